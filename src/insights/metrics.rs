//! Summary metrics derived from a prediction.
//!
//! Ratios and headline figures the operations dashboard shows next to the
//! three core numbers. None of these feed back into the estimator.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::types::{PredictionResult, Weather};

/// Trips one vehicle-percent of the fleet can serve per hour.
const TRIPS_PER_UTILIZATION_POINT: u32 = 8;
/// Utilisation is reported as "optimal" up to this ceiling.
const MAX_UTILIZATION_PCT: u32 = 98;
/// Share of demand shown as the live-vs-forecast delta.
const FORECAST_DELTA_RATIO: f64 = 0.05;
/// Vehicles to have on the road per predicted trip.
const FLEET_BUFFER_RATIO: f64 = 1.1;
/// Share of demand shown as the delta against the daily average.
const VS_AVERAGE_RATIO: f64 = 0.12;

// ---------------------------------------------------------------------------
// Margin
// ---------------------------------------------------------------------------

/// Net profit over gross revenue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Ratio(f64),
    /// Gross revenue was zero, negative or not finite.
    Undefined,
}

impl Margin {
    pub fn of(result: &PredictionResult) -> Self {
        let gross = result.gross_revenue;
        if !gross.is_finite() || gross <= 0.0 || !result.net_profit.is_finite() {
            return Margin::Undefined;
        }
        Margin::Ratio(result.net_profit / gross)
    }

    /// Whole percent, truncated toward zero.
    pub fn percent(&self) -> Option<i64> {
        match self {
            Margin::Ratio(r) => Some((r * 100.0).trunc() as i64),
            Margin::Undefined => None,
        }
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(p) => write!(f, "{p}% Margin"),
            None => write!(f, "undefined"),
        }
    }
}

impl Serialize for Margin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Margin::Ratio(r) => serializer.serialize_f64(*r),
            Margin::Undefined => serializer.serialize_str("undefined"),
        }
    }
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Figures for the top row of the operations view.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetrics {
    pub demand: u32,
    pub gross_revenue: f64,
    pub net_profit: f64,
    pub margin: Margin,
    pub margin_pct: Option<i64>,
    pub utilization_pct: u32,
    /// Requests above the standing forecast.
    pub forecast_delta: u32,
    /// Set when the delta is driven by non-clear weather.
    pub weather_driven: bool,
}

impl SummaryMetrics {
    pub fn from_prediction(result: &PredictionResult, weather: Weather) -> Self {
        let margin = Margin::of(result);
        Self {
            demand: result.demand,
            gross_revenue: result.gross_revenue,
            net_profit: result.net_profit,
            margin,
            margin_pct: margin.percent(),
            utilization_pct: utilization_pct(result.demand),
            forecast_delta: (f64::from(result.demand) * FORECAST_DELTA_RATIO) as u32,
            weather_driven: weather != Weather::Clear,
        }
    }

    /// "+N vs Forecast" label; the sign is only shown for weather-driven swings.
    pub fn forecast_label(&self) -> String {
        let sign = if self.weather_driven { "+" } else { "" };
        format!("{sign}{} vs Forecast", self.forecast_delta)
    }
}

/// Share of the fleet busy serving the predicted demand.
pub fn utilization_pct(demand: u32) -> u32 {
    (demand / TRIPS_PER_UTILIZATION_POINT).min(MAX_UTILIZATION_PCT)
}

// ---------------------------------------------------------------------------
// Dispatch metrics
// ---------------------------------------------------------------------------

/// Figures for the dispatch console.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchMetrics {
    pub demand: u32,
    pub gross_revenue: f64,
    pub fleet_required: u32,
    pub vs_average: u32,
}

impl DispatchMetrics {
    pub fn from_prediction(result: &PredictionResult) -> Self {
        let trips = f64::from(result.demand);
        Self {
            demand: result.demand,
            gross_revenue: result.gross_revenue,
            fleet_required: (trips * FLEET_BUFFER_RATIO) as u32,
            vs_average: (trips * VS_AVERAGE_RATIO) as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn result(demand: u32, gross: f64, net: f64) -> PredictionResult {
        PredictionResult { demand, gross_revenue: gross, net_profit: net }
    }

    #[test]
    fn test_margin_ratio() {
        let m = Margin::of(&result(722, 23_826.0, 20_577.0));
        match m {
            Margin::Ratio(r) => assert!((r - 20_577.0 / 23_826.0).abs() < 1e-12),
            Margin::Undefined => panic!("expected a ratio"),
        }
        assert_eq!(m.percent(), Some(86));
        assert_eq!(m.to_string(), "86% Margin");
    }

    #[test]
    fn test_margin_undefined_on_zero_demand() {
        let m = Margin::of(&result(0, 0.0, 0.0));
        assert_eq!(m, Margin::Undefined);
        assert_eq!(m.percent(), None);
        assert_eq!(m.to_string(), "undefined");
    }

    #[test]
    fn test_margin_undefined_on_negative_or_nan_revenue() {
        assert_eq!(Margin::of(&result(1, -10.0, -14.5)), Margin::Undefined);
        assert_eq!(Margin::of(&result(1, f64::NAN, 1.0)), Margin::Undefined);
    }

    #[test]
    fn test_margin_serialization() {
        assert_eq!(serde_json::to_string(&Margin::Undefined).unwrap(), "\"undefined\"");
        assert_eq!(serde_json::to_string(&Margin::Ratio(0.5)).unwrap(), "0.5");
    }

    #[test]
    fn test_utilization_capped() {
        assert_eq!(utilization_pct(0), 0);
        assert_eq!(utilization_pct(400), 50);
        assert_eq!(utilization_pct(785), 98);
        assert_eq!(utilization_pct(5_000), 98);
    }

    #[test]
    fn test_summary_metrics() {
        let m = SummaryMetrics::from_prediction(&result(722, 23_826.0, 20_577.0), Weather::Clear);
        assert_eq!(m.utilization_pct, 90);
        assert_eq!(m.forecast_delta, 36);
        assert!(!m.weather_driven);
        assert_eq!(m.forecast_label(), "36 vs Forecast");

        let snow = SummaryMetrics::from_prediction(&result(576, 25_344.0, 22_752.0), Weather::Snowstorm);
        assert!(snow.weather_driven);
        assert_eq!(snow.forecast_label(), "+28 vs Forecast");
    }

    #[test]
    fn test_dispatch_metrics() {
        let d = DispatchMetrics::from_prediction(&result(600, 19_800.0, 17_100.0));
        assert_eq!(d.fleet_required, 660);
        assert_eq!(d.vs_average, 72);
    }
}
