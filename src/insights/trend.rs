//! Trend series built by sweeping one input across its range.
//!
//! Each point is an independent call into the estimator, so every point
//! carries its own noise draw.

use serde::Serialize;

use crate::model::noise::NoiseSource;
use crate::model::Estimator;
use crate::types::{DayOfWeek, Month, PredictError, ScenarioContext, TimeContext};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: u8,
    pub demand: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: Month,
    /// Three-letter axis label.
    pub label: &'static str,
    pub net_profit: f64,
    /// The month currently selected by the operator.
    pub highlighted: bool,
}

/// 24-hour demand forecast for one day.
pub fn hourly_demand(
    estimator: &Estimator,
    month: Option<Month>,
    day: Option<DayOfWeek>,
    scenario: &ScenarioContext,
    noise: &mut dyn NoiseSource,
) -> Result<Vec<HourlyPoint>, PredictError> {
    (0..24u8)
        .map(|hour| {
            let time = TimeContext { month, day, hour };
            let r = estimator.predict(&time, scenario, noise)?;
            Ok(HourlyPoint { hour, demand: r.demand })
        })
        .collect()
}

/// Net profit for every month at a fixed day, hour and scenario.
pub fn monthly_profit(
    estimator: &Estimator,
    day: Option<DayOfWeek>,
    hour: u8,
    scenario: &ScenarioContext,
    selected: Option<Month>,
    noise: &mut dyn NoiseSource,
) -> Result<Vec<MonthlyPoint>, PredictError> {
    Month::ALL
        .iter()
        .map(|&month| {
            let time = TimeContext { month: Some(month), day, hour };
            let r = estimator.predict(&time, scenario, noise)?;
            Ok(MonthlyPoint {
                month,
                label: month.abbreviation(),
                net_profit: r.net_profit,
                highlighted: selected == Some(month),
            })
        })
        .collect()
}

/// Hour with the highest demand in a series (earliest on ties).
pub fn peak_hour(series: &[HourlyPoint]) -> Option<HourlyPoint> {
    series
        .iter()
        .copied()
        .reduce(|best, p| if p.demand > best.demand { p } else { best })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
