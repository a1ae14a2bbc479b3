//! Prediction core: demand, gross revenue and net profit for one scenario.
//!
//! A fixed pipeline applied to a base demand figure:
//!
//! 1. Seasonality (multiplicative, only when a month is given).
//! 2. Time of day (additive weekday rush windows, plus nightlife).
//! 3. Weather (multiplicative).
//! 4. Price elasticity (multiplicative, linear in surge).
//!
//! The result is truncated toward zero, bounded noise is added, and the
//! financials are derived from the final trip count. The order matters
//! because additive and multiplicative stages are interleaved.

pub mod noise;
pub mod params;

use serde::Serialize;
use tracing::debug;

use crate::types::{DayOfWeek, Month, PredictError, PredictionResult, ScenarioContext, TimeContext, Weather};
use noise::{NoiseSource, ThreadNoise};
use params::EstimatorConfig;

// ---------------------------------------------------------------------------
// Stage breakdown
// ---------------------------------------------------------------------------

/// Intermediate values of the demand pipeline, before noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandBreakdown {
    pub base: f64,
    pub seasonal_factor: f64,
    pub time_boost: f64,
    pub weather_factor: f64,
    pub elasticity: f64,
    /// Demand after all four stages, before truncation.
    pub demand_float: f64,
    /// Truncated toward zero.
    pub pre_noise: i64,
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Stateless estimator over an immutable configuration.
///
/// Cheap to share: wrap in an `Arc` and call from any number of threads,
/// giving each caller its own `NoiseSource`.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Access the estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Boundary checks. Unknown day/month/weather never reach here as
    /// errors; they are normalised to neutral values by the caller.
    pub fn validate(&self, time: &TimeContext, scenario: &ScenarioContext) -> Result<(), PredictError> {
        if time.hour > 23 {
            return Err(PredictError::InvalidArgument(format!(
                "hour must be in 0..=23, got {}",
                time.hour
            )));
        }
        let surge = scenario.surge;
        if !surge.is_finite() || surge <= 0.0 || surge > self.config.max_surge {
            return Err(PredictError::InvalidArgument(format!(
                "surge must be in (0, {}], got {surge}",
                self.config.max_surge
            )));
        }
        Ok(())
    }

    /// Run the four demand stages without drawing noise.
    pub fn breakdown(
        &self,
        time: &TimeContext,
        scenario: &ScenarioContext,
    ) -> Result<DemandBreakdown, PredictError> {
        self.validate(time, scenario)?;

        let base = self.config.base_demand;
        let seasonal_factor = time.month.map_or(1.0, |m| self.config.seasonal_factor(m));
        let mut demand = base * seasonal_factor;

        let time_boost = self.time_boost(time.day, time.hour);
        demand += time_boost;

        let weather_factor = self.config.weather_multiplier(scenario.weather);
        demand *= weather_factor;

        let elasticity = self.elasticity(scenario.surge);
        let demand_float = demand * elasticity;
        let pre_noise = demand_float.trunc() as i64;

        Ok(DemandBreakdown {
            base,
            seasonal_factor,
            time_boost,
            weather_factor,
            elasticity,
            demand_float,
            pre_noise,
        })
    }

    /// Full prediction: pipeline, noise, financials.
    pub fn predict(
        &self,
        time: &TimeContext,
        scenario: &ScenarioContext,
        noise: &mut dyn NoiseSource,
    ) -> Result<PredictionResult, PredictError> {
        let stages = self.breakdown(time, scenario)?;
        let jitter = noise.sample(self.config.noise_bound);
        let demand = u32::try_from(stages.pre_noise.saturating_add(jitter).max(0)).unwrap_or(u32::MAX);
        let (gross_revenue, net_profit) = self.financials(demand, scenario.surge);

        debug!(
            time = %time,
            scenario = %scenario,
            seasonal = stages.seasonal_factor,
            time_boost = stages.time_boost,
            weather = stages.weather_factor,
            elasticity = stages.elasticity,
            pre_noise = stages.pre_noise,
            jitter,
            demand,
            "Prediction computed"
        );

        Ok(PredictionResult {
            demand,
            gross_revenue,
            net_profit,
        })
    }

    /// Gross revenue and net profit for a trip count at a given surge.
    pub fn financials(&self, demand: u32, surge: f64) -> (f64, f64) {
        let trips = f64::from(demand);
        let gross = trips * (self.config.price_per_trip * surge);
        let net = gross - trips * self.config.operating_cost_per_trip;
        (gross, net)
    }

    /// Linear elasticity, clamped so demand can't go negative.
    pub fn elasticity(&self, surge: f64) -> f64 {
        (1.0 - surge * self.config.elasticity_slope).max(0.0)
    }

    fn time_boost(&self, day: Option<DayOfWeek>, hour: u8) -> f64 {
        let Some(day) = day else {
            return 0.0;
        };

        let mut boost = 0.0;
        if day.is_weekday() {
            for window in &self.config.rush_windows {
                if window.contains(hour) {
                    boost += window.boost;
                }
            }
        }
        if self.config.nightlife.applies(day, hour) {
            boost += self.config.nightlife.boost;
        }
        boost
    }
}

/// One-shot prediction with the default configuration and thread-local noise.
pub fn predict(
    month: Option<Month>,
    day: DayOfWeek,
    hour: u8,
    surge: f64,
    weather: Weather,
) -> Result<PredictionResult, PredictError> {
    Estimator::default().predict(
        &TimeContext::new(month, day, hour),
        &ScenarioContext::new(weather, surge),
        &mut ThreadNoise,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
