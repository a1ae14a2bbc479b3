//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Only
//! `[app]` and `[dashboard]` are required; the estimator, map, alert and
//! scenario tables fall back to their documented defaults.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fs;

use crate::insights::alerts::AlertThresholds;
use crate::insights::heatmap::HeatmapConfig;
use crate::model::params::{EstimatorConfig, ModelPreset};
use crate::types::{DayOfWeek, Month, PredictError, ScenarioContext, TimeContext, Weather};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub app: AppSection,
    pub dashboard: DashboardConfig,
    #[serde(default, deserialize_with = "model_with_preset")]
    pub model: EstimatorConfig,
    #[serde(default)]
    pub map: HeatmapConfig,
    #[serde(default)]
    pub alerts: AlertThresholds,
    #[serde(default)]
    pub scenario: ScenarioDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
    pub fleet_city: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "CyberCab Operations Center".into(),
            fleet_city: "New York".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8501,
        }
    }
}

/// Scenario used when a request leaves a parameter out.
///
/// Month, day and hour default to the current local time; weather defaults
/// to the month's suggested condition.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScenarioDefaults {
    pub month: Option<Month>,
    pub day: Option<DayOfWeek>,
    pub hour: Option<u8>,
    pub surge: f64,
    pub weather: Option<Weather>,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            month: None,
            day: None,
            hour: None,
            surge: 1.5,
            weather: None,
        }
    }
}

impl ScenarioDefaults {
    /// Time context for "now", with configured fields taking precedence.
    pub fn time_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TimeContext {
        TimeContext {
            month: self.month.or_else(|| Month::from_number(now.month())),
            day: Some(self.day.unwrap_or_else(|| now.weekday().into())),
            hour: self.hour.unwrap_or(now.hour() as u8),
        }
    }

    pub fn scenario_for(&self, month: Option<Month>) -> ScenarioContext {
        ScenarioContext {
            weather: self.weather.unwrap_or_else(|| Weather::suggested_for(month)),
            surge: self.surge,
        }
    }
}

/// Read `[model]`, starting from the table's `preset` (operations-center
/// constants when absent) and overlaying every other key on top of it.
/// The overlay is per key: a listed array replaces the preset's array whole.
fn model_with_preset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EstimatorConfig, D::Error> {
    let mut table = toml::Table::deserialize(deserializer)?;
    let preset = match table.remove("preset") {
        Some(value) => value.try_into::<ModelPreset>().map_err(D::Error::custom)?,
        None => ModelPreset::default(),
    };

    let mut merged = match toml::Value::try_from(preset.config()).map_err(D::Error::custom)? {
        toml::Value::Table(base) => base,
        _ => return Err(D::Error::custom("model preset did not serialize to a table")),
    };
    merged.extend(table);
    toml::Value::Table(merged).try_into().map_err(D::Error::custom)
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to load config file: {path}"))?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PredictError> {
        self.model.validate()?;

        if !(self.map.spread_divisor.is_finite() && self.map.spread_divisor > 0.0) {
            return Err(PredictError::Config(format!(
                "map.spread_divisor must be positive, got {}",
                self.map.spread_divisor
            )));
        }
        if let Some(hour) = self.scenario.hour {
            if hour > 23 {
                return Err(PredictError::Config(format!("scenario.hour must be 0-23, got {hour}")));
            }
        }
        let surge = self.scenario.surge;
        if !(surge.is_finite() && surge > 0.0 && surge <= self.model.max_surge) {
            return Err(PredictError::Config(format!(
                "scenario.surge must be in (0, {}], got {surge}",
                self.model.max_surge
            )));
        }
        Ok(())
    }
}
