//! IRT Dashboard HTTP Server Binary
//!
//! Loads the logger export once, resamples it, and serves the dashboard.
//!
//! # Usage
//!
//! ```bash
//! DATA_PATH=comparison_data_analog_sensors.xlsx cargo run --bin irt-dashboard-server
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_CONFIG`: Path to a `dashboard.toml` (default: searched in `.`, `backend/`, `..`)
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8050)
//! - `DATA_PATH`: Spreadsheet or CSV to load
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use irt_dashboard::config::DashboardConfig;
use irt_dashboard::http::{create_router, AppState};
use irt_dashboard::services::DashboardContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting IRT dashboard server");

    let config = DashboardConfig::load().context("Failed to load configuration")?;
    let addr = config.bind_address()?;

    let context = DashboardContext::load(&config.data)
        .with_context(|| format!("Failed to load {}", config.data.path.display()))?;
    info!(
        "Loaded {} readings into {} buckets of {} minutes",
        context.table().len(),
        context.series().len(),
        config.data.bucket_minutes
    );

    let app = create_router(AppState::new(context));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
