//! Fleet distribution heatmap.
//!
//! Purely cosmetic: one synthetic pickup point per predicted trip,
//! scattered with Gaussian jitter around a fixed map center.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Map center and scatter parameters (`[map]` in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Standard-normal jitter is divided by this; larger means tighter.
    pub spread_divisor: f64,
    /// Upper bound on generated points regardless of demand.
    pub max_points: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            // Times Square
            center_lat: 40.758896,
            center_lon: -73.985130,
            spread_divisor: 50.0,
            max_points: 5_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Scatter `demand` points (capped at `max_points`) around the center.
pub fn scatter_points<R: Rng>(config: &HeatmapConfig, demand: u32, rng: &mut R) -> Vec<GeoPoint> {
    let count = (demand as usize).min(config.max_points);
    (0..count)
        .map(|_| {
            let dlat: f64 = rng.sample(StandardNormal);
            let dlon: f64 = rng.sample(StandardNormal);
            GeoPoint {
                lat: config.center_lat + dlat / config.spread_divisor,
                lon: config.center_lon + dlon / config.spread_divisor,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
