//! A web service that greets people by name.

use greeting_service::{
    app,
    infra::{config, logging, metrics, state::AppState},
};
use std::time::Duration;
use tokio::net::TcpListener;

/// How often the Prometheus recorder drains its histograms.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    color_eyre::install()?;
    let config = config::load_config()?;
    let _guard = logging::init_logging(&config.log);

    let metrics = if config.metrics.enabled {
        let handle = metrics::init_metrics()?;
        let upkeep = handle.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
            loop {
                interval.tick().await;
                upkeep.run_upkeep();
            }
        });
        Some(handle)
    } else {
        None
    };

    let state = AppState::from_config(&config, metrics);
    let listener =
        TcpListener::bind(format!("{}:{}", config.server.address, config.server.port)).await?;
    app::run_app(listener, state, config.server).await?;

    Ok(())
}
