//! Estimator parameters.
//!
//! Every constant the prediction pipeline uses lives here, with the
//! operations-center values as defaults. The struct deserializes from the
//! `[model]` table of `config.toml`; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::types::{DayOfWeek, Month, PredictError, Weather};

// ---------------------------------------------------------------------------
// Stage parameters
// ---------------------------------------------------------------------------

/// Multiplier applied to base demand for a group of months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactor {
    pub label: String,
    pub months: Vec<Month>,
    pub factor: f64,
}

/// Additive weekday boost for an inclusive hour range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushWindow {
    pub label: String,
    pub start_hour: u8,
    pub end_hour: u8,
    pub boost: f64,
}

impl RushWindow {
    pub fn contains(&self, hour: u8) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

/// Additive late-evening boost, applied on the listed days regardless of
/// whether they are weekdays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlifeRule {
    pub days: Vec<DayOfWeek>,
    pub from_hour: u8,
    pub boost: f64,
}

impl NightlifeRule {
    pub fn applies(&self, day: DayOfWeek, hour: u8) -> bool {
        hour >= self.from_hour && self.days.contains(&day)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Full estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Trips per hour before any adjustment.
    pub base_demand: f64,
    /// Checked in order; the first group containing the month wins.
    pub seasonal_factors: Vec<SeasonalFactor>,
    /// Weekday-only boosts. Each window is an independent condition.
    pub rush_windows: Vec<RushWindow>,
    pub nightlife: NightlifeRule,
    pub rain_multiplier: f64,
    pub snowstorm_multiplier: f64,
    /// Demand lost per unit of surge: `elasticity = 1 - surge * slope`.
    pub elasticity_slope: f64,
    /// Base fare per trip before surge.
    pub price_per_trip: f64,
    pub operating_cost_per_trip: f64,
    /// Noise is drawn uniformly from `[-noise_bound, noise_bound]`.
    pub noise_bound: u32,
    /// Largest surge the estimator accepts. Independent of
    /// `elasticity_slope`; surges past `1 / elasticity_slope` are accepted
    /// up to this cap and predict zero demand.
    pub max_surge: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_demand: 400.0,
            seasonal_factors: vec![
                SeasonalFactor {
                    label: "summer dip".into(),
                    months: vec![Month::July, Month::August],
                    factor: 0.75,
                },
                SeasonalFactor {
                    label: "holiday rush".into(),
                    months: vec![Month::November, Month::December],
                    factor: 1.25,
                },
                SeasonalFactor {
                    label: "spring peak".into(),
                    months: vec![Month::March, Month::April, Month::May],
                    factor: 1.10,
                },
            ],
            rush_windows: vec![
                RushWindow { label: "AM rush".into(), start_hour: 7, end_hour: 10, boost: 300.0 },
                RushWindow { label: "PM rush".into(), start_hour: 16, end_hour: 19, boost: 450.0 },
            ],
            nightlife: NightlifeRule {
                days: vec![DayOfWeek::Friday, DayOfWeek::Saturday],
                from_hour: 20,
                boost: 400.0,
            },
            rain_multiplier: 1.15,
            snowstorm_multiplier: 0.9,
            elasticity_slope: 0.1,
            price_per_trip: 22.0,
            operating_cost_per_trip: 4.50,
            noise_bound: 15,
            max_surge: 10.0,
        }
    }
}

/// Named constant sets a `[model]` table can start from via `preset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPreset {
    #[default]
    OperationsCenter,
    DispatchClassic,
}

impl ModelPreset {
    pub fn config(self) -> EstimatorConfig {
        match self {
            ModelPreset::OperationsCenter => EstimatorConfig::default(),
            ModelPreset::DispatchClassic => EstimatorConfig::dispatch_classic(),
        }
    }
}

impl EstimatorConfig {
    /// Constants of the earlier dispatch console: no seasonality, heavier
    /// weather swings, a higher base fare and wider noise.
    pub fn dispatch_classic() -> Self {
        Self {
            seasonal_factors: Vec::new(),
            rain_multiplier: 1.3,
            snowstorm_multiplier: 0.8,
            price_per_trip: 25.0,
            noise_bound: 20,
            ..Self::default()
        }
    }

    /// Demand multiplier for a weather condition.
    pub fn weather_multiplier(&self, weather: Weather) -> f64 {
        match weather {
            Weather::Clear => 1.0,
            Weather::Rain => self.rain_multiplier,
            Weather::Snowstorm => self.snowstorm_multiplier,
        }
    }

    /// Seasonal multiplier for a month (1.0 when no group matches).
    pub fn seasonal_factor(&self, month: Month) -> f64 {
        self.seasonal_factors
            .iter()
            .find(|s| s.months.contains(&month))
            .map_or(1.0, |s| s.factor)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<(), PredictError> {
        let finite_non_negative = |name: &str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(PredictError::Config(format!("{name} must be finite and >= 0, got {v}")))
            }
        };

        finite_non_negative("base_demand", self.base_demand)?;
        finite_non_negative("rain_multiplier", self.rain_multiplier)?;
        finite_non_negative("snowstorm_multiplier", self.snowstorm_multiplier)?;
        finite_non_negative("elasticity_slope", self.elasticity_slope)?;
        finite_non_negative("operating_cost_per_trip", self.operating_cost_per_trip)?;

        if !(self.price_per_trip.is_finite() && self.price_per_trip > 0.0) {
            return Err(PredictError::Config(format!(
                "price_per_trip must be positive, got {}",
                self.price_per_trip
            )));
        }
        if !(self.max_surge.is_finite() && self.max_surge > 0.0) {
            return Err(PredictError::Config(format!(
                "max_surge must be positive, got {}",
                self.max_surge
            )));
        }

        for s in &self.seasonal_factors {
            finite_non_negative(&format!("seasonal factor '{}'", s.label), s.factor)?;
        }

        for w in &self.rush_windows {
            if w.start_hour > w.end_hour || w.end_hour > 23 {
                return Err(PredictError::Config(format!(
                    "rush window '{}' has invalid hours {}..={}",
                    w.label, w.start_hour, w.end_hour
                )));
            }
            finite_non_negative(&format!("rush window '{}' boost", w.label), w.boost)?;
        }

        if self.nightlife.from_hour > 23 {
            return Err(PredictError::Config(format!(
                "nightlife from_hour must be 0-23, got {}",
                self.nightlife.from_hour
            )));
        }
        finite_non_negative("nightlife boost", self.nightlife.boost)?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
