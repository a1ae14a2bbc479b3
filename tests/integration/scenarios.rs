//! Reference scenarios through the public library API.
//!
//! Noise is pinned with `NoNoise`, `ScriptedNoise` or a fixed seed so the
//! expected numbers are exact.

use cybercab::insights::alerts::{dispatch_advisory, seasonal_advisory, AlertThresholds, Severity};
use cybercab::insights::metrics::{Margin, SummaryMetrics};
use cybercab::insights::trend::{hourly_demand, monthly_profit};
use cybercab::model::noise::{NoNoise, ScriptedNoise, SeededNoise};
use cybercab::model::params::EstimatorConfig;
use cybercab::model::{predict, Estimator};
use cybercab::types::{DayOfWeek, Month, PredictError, PredictionResult, ScenarioContext, TimeContext, Weather};

fn exact(month: Option<Month>, day: DayOfWeek, hour: u8, surge: f64, weather: Weather) -> PredictionResult {
    Estimator::default()
        .predict(
            &TimeContext::new(month, day, hour),
            &ScenarioContext::new(weather, surge),
            &mut NoNoise,
        )
        .unwrap()
}

#[test]
fn test_midweek_evening_rush() {
    let r = exact(None, DayOfWeek::Wednesday, 17, 1.5, Weather::Clear);
    assert_eq!(r.demand, 722);
    assert_eq!(r.gross_revenue, 23_826.0);
    assert_eq!(r.net_profit, 20_577.0);
}

#[test]
fn test_saturday_night_in_a_snowstorm() {
    let r = exact(None, DayOfWeek::Saturday, 22, 2.0, Weather::Snowstorm);
    assert_eq!(r.demand, 576);
    assert_eq!(r.gross_revenue, 25_344.0);
    assert_eq!(r.net_profit, 22_752.0);
}

#[test]
fn test_holiday_friday_night_in_rain() {
    // (400 * 1.25 + 400) * 1.15 * 0.9 = 931.5
    let r = exact(Some(Month::December), DayOfWeek::Friday, 21, 1.0, Weather::Rain);
    assert_eq!(r.demand, 931);
    assert_eq!(r.gross_revenue, 20_482.0);
    assert_eq!(r.net_profit, 16_292.5);
}

#[test]
fn test_out_of_range_hour_rejected() {
    let err = predict(None, DayOfWeek::Monday, 25, 1.5, Weather::Clear).unwrap_err();
    assert!(matches!(err, PredictError::InvalidArgument(_)));
}

#[test]
fn test_zero_demand_margin_is_undefined() {
    let config = EstimatorConfig {
        base_demand: 0.0,
        rush_windows: Vec::new(),
        ..Default::default()
    };
    let est = Estimator::new(config);
    let r = est
        .predict(
            &TimeContext::new(None, DayOfWeek::Sunday, 3),
            &ScenarioContext::new(Weather::Clear, 1.0),
            &mut ScriptedNoise::new(vec![-10]),
        )
        .unwrap();
    assert_eq!(r.demand, 0);
    let metrics = SummaryMetrics::from_prediction(&r, Weather::Clear);
    assert_eq!(metrics.margin, Margin::Undefined);
    assert_eq!(metrics.margin_pct, None);
}

#[test]
fn test_scripted_noise_shifts_demand_exactly() {
    let est = Estimator::default();
    let time = TimeContext::new(None, DayOfWeek::Wednesday, 17);
    let scenario = ScenarioContext::new(Weather::Clear, 1.5);
    let mut noise = ScriptedNoise::new(vec![15, -15]);
    assert_eq!(est.predict(&time, &scenario, &mut noise).unwrap().demand, 737);
    assert_eq!(est.predict(&time, &scenario, &mut noise).unwrap().demand, 707);
}

#[test]
fn test_seeded_trends_reproducible() {
    let est = Estimator::default();
    let scenario = ScenarioContext::new(Weather::Clear, 1.5);
    let a = hourly_demand(&est, None, Some(DayOfWeek::Friday), &scenario, &mut SeededNoise::new(2026)).unwrap();
    let b = hourly_demand(&est, None, Some(DayOfWeek::Friday), &scenario, &mut SeededNoise::new(2026)).unwrap();
    assert_eq!(a, b);

    let m1 = monthly_profit(&est, Some(DayOfWeek::Wednesday), 17, &scenario, None, &mut SeededNoise::new(1)).unwrap();
    let m2 = monthly_profit(&est, Some(DayOfWeek::Wednesday), 17, &scenario, None, &mut SeededNoise::new(1)).unwrap();
    assert_eq!(m1, m2);
}

#[test]
fn test_weather_never_changes_fare() {
    for weather in Weather::ALL {
        let r = exact(Some(Month::May), DayOfWeek::Thursday, 8, 2.5, weather);
        assert_eq!(r.revenue_per_trip(), Some(55.0));
    }
}

#[test]
fn test_august_dip_triggers_reroute_advisory() {
    let r = exact(Some(Month::August), DayOfWeek::Sunday, 14, 1.5, Weather::Clear);
    // 400 * 0.75 * 0.85 = 255
    assert_eq!(r.demand, 255);
    let thresholds = AlertThresholds::default();
    let seasonal = seasonal_advisory(&thresholds, Some(Month::August), Weather::Clear, &r);
    assert_eq!(seasonal.severity, Severity::Info);
    let dispatch = dispatch_advisory(&thresholds, &r);
    assert_eq!(dispatch.severity, Severity::Success);
}
