//! HTTP API driven through the router without binding a socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use cybercab::config::AppConfig;
use cybercab::dashboard::build_router;
use cybercab::dashboard::routes::DashboardState;

const CONFIG: &str = r#"
    [app]
    name = "CyberCab Integration"
    fleet_city = "New York"

    [dashboard]
    enabled = true
    port = 0

    [model]
    noise_bound = 0

    [scenario]
    month = "November"
    day = "Thursday"
    hour = 9
    surge = 2.0
"#;

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let cfg = AppConfig::from_toml(CONFIG).unwrap();
    let app = build_router(Arc::new(DashboardState::new(&cfg)));
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_defaults_from_config_scenario() {
    let (status, json) = get("/api/predict").await;
    assert_eq!(status, StatusCode::OK);
    // (400 * 1.25 + 300) * 0.8 = 640, noise disabled
    assert_eq!(json["prediction"]["demand"], 640);
    assert_eq!(json["prediction"]["gross_revenue"], 28_160.0);
    assert_eq!(json["scenario"]["weather"], "Clear");
    assert_eq!(json["time"]["month"], "November");
}

#[tokio::test]
async fn test_unknown_literals_fall_back_softly() {
    let (status, json) = get("/api/predict?month=Smarch&day=Funday&weather=hail&hour=9&surge=1.0").await;
    assert_eq!(status, StatusCode::OK);
    // no seasonality, no time boost, clear weather
    assert_eq!(json["prediction"]["demand"], 360);
    assert!(json["time"]["month"].is_null());
    assert!(json["time"]["day"].is_null());
}

#[tokio::test]
async fn test_hour_out_of_range_is_rejected() {
    let (status, json) = get("/api/predict?hour=24").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_surge_above_cap_is_rejected() {
    let (status, _) = get("/api/heatmap?surge=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hourly_trend_peaks_in_pm_rush() {
    let (status, json) = get("/api/trend/hourly?day=Tuesday&surge=1.5&weather=Clear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["peak_hour"], 16);
}

#[tokio::test]
async fn test_dispatch_high_demand() {
    let (status, json) = get("/api/dispatch?day=Friday&hour=18&surge=1.0&weather=Rain").await;
    assert_eq!(status, StatusCode::OK);
    // (400 * 1.25 + 450) * 1.15 * 0.9 = 983.25
    assert_eq!(json["metrics"]["demand"], 983);
    assert_eq!(json["metrics"]["fleet_required"], 1081);
    assert_eq!(json["advisory"]["severity"], "Critical");
}
