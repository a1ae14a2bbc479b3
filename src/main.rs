//! CYBERCAB: Operations Center
//!
//! Entry point. Loads configuration, initialises structured logging, logs a
//! snapshot prediction for the configured scenario, and serves the
//! dashboard until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use cybercab::config;
use cybercab::dashboard::{self, routes::DashboardState};
use cybercab::insights::alerts::seasonal_advisory;
use cybercab::insights::metrics::SummaryMetrics;
use cybercab::model::noise::ThreadNoise;
use cybercab::model::Estimator;

const BANNER: &str = r#"
  ______   ______  _____ ____   ____    _    ____
 / ___\ \ / / __ )| ____|  _ \ / ___|  / \  | __ )
| |    \ V /|  _ \|  _| | |_) | |     / _ \ |  _ \
| |___  | | | |_) | |___|  _ <| |___ / ___ \| |_) |
 \____| |_| |____/|_____|_| \_\\____/_/   \_\____/

  Autonomous Fleet Operations Center
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("CYBERCAB_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let cfg = config::AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        name = %cfg.app.name,
        city = %cfg.app.fleet_city,
        price_per_trip = cfg.model.price_per_trip,
        noise_bound = cfg.model.noise_bound,
        "CYBERCAB starting up"
    );

    log_snapshot(&cfg);

    if !cfg.dashboard.enabled {
        warn!("Dashboard disabled in config; nothing left to do");
        return Ok(());
    }

    let state = Arc::new(DashboardState::new(&cfg));
    dashboard::serve(state, cfg.dashboard.port, shutdown_signal()).await?;

    info!("CYBERCAB shut down cleanly.");
    Ok(())
}

/// Predict the configured scenario once and log the headline figures.
fn log_snapshot(cfg: &config::AppConfig) {
    let estimator = Estimator::new(cfg.model.clone());
    let time = cfg.scenario.time_at(&chrono::Local::now());
    let scenario = cfg.scenario.scenario_for(time.month);

    match estimator.predict(&time, &scenario, &mut ThreadNoise) {
        Ok(result) => {
            let metrics = SummaryMetrics::from_prediction(&result, scenario.weather);
            let advisory = seasonal_advisory(&cfg.alerts, time.month, scenario.weather, &result);
            info!(
                time = %time,
                scenario = %scenario,
                demand = result.demand,
                gross = format!("${:.0}", result.gross_revenue),
                net = format!("${:.0}", result.net_profit),
                margin = %metrics.margin,
                utilization = metrics.utilization_pct,
                advisory = %advisory,
                "Current scenario snapshot"
            );
        }
        Err(e) => warn!(error = %e, "Snapshot prediction failed"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cybercab=info"));

    let json_logging = std::env::var("CYBERCAB_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
