//! Operational advisories.
//!
//! Threshold policy over a prediction that picks one canned message for the
//! banner under the dashboard. Two policies exist: the seasonal view used by
//! the operations center and the demand-band view used by dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Month, PredictionResult, Weather};

/// Advisory thresholds (`[alerts]` in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// August demand below this triggers the summer-dip reroute.
    pub summer_dip_demand: u32,
    /// Demand above this calls in reserves.
    pub high_demand: u32,
    /// Demand below this sends idle units to charge.
    pub low_demand: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            summer_dip_demand: 500,
            high_demand: 500,
            low_demand: 150,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "✅ OK"),
            Severity::Info => write!(f, "ℹ️ INFO"),
            Severity::Warning => write!(f, "⚠️ WARNING"),
            Severity::Critical => write!(f, "🚨 CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub severity: Severity,
    pub title: &'static str,
    pub message: &'static str,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.title, self.message)
    }
}

/// Operations-center policy: summer dip first, then winter weather.
pub fn seasonal_advisory(
    thresholds: &AlertThresholds,
    month: Option<Month>,
    weather: Weather,
    result: &PredictionResult,
) -> Advisory {
    if month == Some(Month::August) && result.demand < thresholds.summer_dip_demand {
        Advisory {
            severity: Severity::Info,
            title: "SEASONAL ALERT",
            message: "Summer dip detected. Re-routing excess fleet to JFK Airport.",
        }
    } else if weather == Weather::Snowstorm {
        Advisory {
            severity: Severity::Warning,
            title: "WINTER PROTOCOL",
            message: "Maximize regenerative braking. Deploy AWD units only.",
        }
    } else {
        Advisory {
            severity: Severity::Success,
            title: "SYSTEM OPTIMAL",
            message: "Standard patrol routes active.",
        }
    }
}

/// Dispatch policy: demand bands only.
pub fn dispatch_advisory(thresholds: &AlertThresholds, result: &PredictionResult) -> Advisory {
    if result.demand > thresholds.high_demand {
        Advisory {
            severity: Severity::Critical,
            title: "HIGH DEMAND ALERT",
            message: "Deploy reserves from Queens Depot.",
        }
    } else if result.demand < thresholds.low_demand {
        Advisory {
            severity: Severity::Info,
            title: "CHARGING MODE",
            message: "Route excess units to Supercharger hubs.",
        }
    } else {
        Advisory {
            severity: Severity::Success,
            title: "OPTIMAL STATE",
            message: "Maintain patrol routes.",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
