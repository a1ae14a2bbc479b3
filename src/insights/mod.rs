//! Downstream views over the prediction core.
//!
//! Everything here only reads `PredictionResult`s: headline metrics,
//! advisories, trend sweeps, and the cosmetic heatmap scatter.

pub mod alerts;
pub mod heatmap;
pub mod metrics;
pub mod trend;
