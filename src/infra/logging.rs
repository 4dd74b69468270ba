//! For setting up logging.

use super::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Flushes logs upon being dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initializes logging.
pub fn init_logging(config: &LogConfig) -> LogGuard {
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,tower_http=debug,greeting_service=debug".into());

    let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let stdout = if config.json {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_stdout)
            .json()
            .with_filter(EnvFilter::new(&log_level))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_stdout)
            .with_filter(EnvFilter::new(&log_level))
            .boxed()
    };

    tracing_subscriber::registry()
        .with(stdout)
        .with(ErrorLayer::default())
        .init();

    LogGuard {
        _guards: vec![stdout_guard],
    }
}
