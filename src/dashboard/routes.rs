//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`;
//! every request builds its own noise source, so handlers never contend.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::config::{AppConfig, ScenarioDefaults};
use crate::insights::alerts::{dispatch_advisory, seasonal_advisory, Advisory, AlertThresholds};
use crate::insights::heatmap::{scatter_points, GeoPoint, HeatmapConfig};
use crate::insights::metrics::{DispatchMetrics, SummaryMetrics};
use crate::insights::trend::{hourly_demand, monthly_profit, peak_hour, HourlyPoint, MonthlyPoint};
use crate::model::noise::{NoiseSource, SeededNoise, ThreadNoise};
use crate::model::params::EstimatorConfig;
use crate::model::{DemandBreakdown, Estimator};
use crate::types::{
    DayOfWeek, Month, PredictError, PredictionResult, ScenarioContext, TimeContext, Weather,
};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers. Read-only after start-up.
pub struct DashboardState {
    pub app_name: String,
    pub fleet_city: String,
    pub estimator: Estimator,
    pub map: HeatmapConfig,
    pub alerts: AlertThresholds,
    pub scenario: ScenarioDefaults,
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            app_name: config.app.name.clone(),
            fleet_city: config.app.fleet_city.clone(),
            estimator: Estimator::new(config.model.clone()),
            map: config.map.clone(),
            alerts: config.alerts.clone(),
            scenario: config.scenario.clone(),
            started_at: Utc::now(),
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Scenario parameters shared by every prediction endpoint. Anything left
/// out falls back to the configured scenario defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioQuery {
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<i64>,
    pub surge: Option<f64>,
    pub weather: Option<String>,
    /// Fixes the noise draw for reproducible responses.
    pub seed: Option<u64>,
}

impl ScenarioQuery {
    /// Resolve into estimator inputs. Unknown literals are normalised to
    /// neutral values; only the hour can fail here.
    pub fn resolve(&self, defaults: &ScenarioDefaults) -> Result<(TimeContext, ScenarioContext), PredictError> {
        let now = defaults.time_at(&Local::now());

        let month = match &self.month {
            Some(m) => Month::parse_lenient(m),
            None => now.month,
        };
        let day = match &self.day {
            Some(d) => DayOfWeek::parse_lenient(d),
            None => now.day,
        };
        let hour = match self.hour {
            Some(h) => u8::try_from(h)
                .map_err(|_| PredictError::InvalidArgument(format!("hour must be in 0..=23, got {h}")))?,
            None => now.hour,
        };

        let fallback = defaults.scenario_for(month);
        let weather = self
            .weather
            .as_deref()
            .map_or(fallback.weather, Weather::parse_lenient);
        let surge = self.surge.unwrap_or(fallback.surge);

        Ok((TimeContext { month, day, hour }, ScenarioContext { weather, surge }))
    }

    fn noise(&self) -> Box<dyn NoiseSource> {
        match self.seed {
            Some(seed) => Box::new(SeededNoise::new(seed)),
            None => Box::new(ThreadNoise),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// JSON error body returned for rejected requests.
#[derive(Debug)]
pub struct ApiError(PredictError);

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            PredictError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            PredictError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(error = %self.0, status = status.as_u16(), "Request rejected");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub name: String,
    pub fleet_city: String,
    pub status: &'static str,
    pub uptime_secs: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub time: TimeContext,
    pub scenario: ScenarioContext,
    pub prediction: PredictionResult,
    pub breakdown: DemandBreakdown,
    pub metrics: SummaryMetrics,
    pub advisory: Advisory,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    pub time: TimeContext,
    pub scenario: ScenarioContext,
    pub metrics: DispatchMetrics,
    pub advisory: Advisory,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlyTrendResponse {
    pub day: Option<DayOfWeek>,
    pub peak_hour: Option<u8>,
    pub series: Vec<HourlyPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendResponse {
    pub day: Option<DayOfWeek>,
    pub hour: u8,
    pub series: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapResponse {
    pub demand: u32,
    pub center: GeoPoint,
    pub points: Vec<GeoPoint>,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        name: state.app_name.clone(),
        fleet_city: state.fleet_city.clone(),
        status: "ONLINE",
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<EstimatorConfig> {
    Json(state.estimator.config().clone())
}

/// GET /api/predict
pub async fn get_predict(
    State(state): State<AppState>,
    Query(q): Query<ScenarioQuery>,
) -> Result<Json<PredictResponse>, ApiError> {
    Ok(Json(predict_view(&state, &q)?))
}

/// GET /api/dispatch
pub async fn get_dispatch(
    State(state): State<AppState>,
    Query(q): Query<ScenarioQuery>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let (time, scenario) = q.resolve(&state.scenario)?;
    let result = state.estimator.predict(&time, &scenario, q.noise().as_mut())?;
    Ok(Json(DispatchResponse {
        time,
        scenario,
        metrics: DispatchMetrics::from_prediction(&result),
        advisory: dispatch_advisory(&state.alerts, &result),
    }))
}

/// GET /api/trend/hourly
pub async fn get_hourly_trend(
    State(state): State<AppState>,
    Query(q): Query<ScenarioQuery>,
) -> Result<Json<HourlyTrendResponse>, ApiError> {
    let (time, scenario) = q.resolve(&state.scenario)?;
    let series = hourly_demand(&state.estimator, time.month, time.day, &scenario, q.noise().as_mut())?;
    Ok(Json(HourlyTrendResponse {
        day: time.day,
        peak_hour: peak_hour(&series).map(|p| p.hour),
        series,
    }))
}

/// GET /api/trend/monthly
///
/// Defaults to the operations-center reference slot (Wednesday 17:00,
/// 1.5x surge, clear weather) rather than the clock.
pub async fn get_monthly_trend(
    State(state): State<AppState>,
    Query(q): Query<ScenarioQuery>,
) -> Result<Json<MonthlyTrendResponse>, ApiError> {
    let selected = q.month.as_deref().and_then(Month::parse_lenient);
    let q = ScenarioQuery {
        day: q.day.clone().or_else(|| Some("Wednesday".into())),
        hour: q.hour.or(Some(17)),
        surge: q.surge.or(Some(1.5)),
        weather: q.weather.clone().or_else(|| Some("Clear".into())),
        ..q
    };
    let (time, scenario) = q.resolve(&state.scenario)?;
    let series = monthly_profit(
        &state.estimator,
        time.day,
        time.hour,
        &scenario,
        selected,
        q.noise().as_mut(),
    )?;
    Ok(Json(MonthlyTrendResponse {
        day: time.day,
        hour: time.hour,
        series,
    }))
}

/// GET /api/heatmap
pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(q): Query<ScenarioQuery>,
) -> Result<Json<HeatmapResponse>, ApiError> {
    let (time, scenario) = q.resolve(&state.scenario)?;
    let result = state.estimator.predict(&time, &scenario, q.noise().as_mut())?;
    let points = scatter_points(&state.map, result.demand, &mut q.rng());
    Ok(Json(HeatmapResponse {
        demand: result.demand,
        center: GeoPoint {
            lat: state.map.center_lat,
            lon: state.map.center_lon,
        },
        points,
    }))
}

/// Prediction plus everything the top of the operations view shows.
pub fn predict_view(state: &DashboardState, q: &ScenarioQuery) -> Result<PredictResponse, PredictError> {
    let (time, scenario) = q.resolve(&state.scenario)?;
    let breakdown = state.estimator.breakdown(&time, &scenario)?;
    let prediction = state.estimator.predict(&time, &scenario, q.noise().as_mut())?;

    Ok(PredictResponse {
        metrics: SummaryMetrics::from_prediction(&prediction, scenario.weather),
        advisory: seasonal_advisory(&state.alerts, time.month, scenario.weather, &prediction),
        time,
        scenario,
        prediction,
        breakdown,
        generated_at: Utc::now().to_rfc3339(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
