//! Global application state.
//!
//! Everything here is resolved once at startup and is read-only afterwards.

use super::config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use std::{fmt::Debug, sync::Arc};

/// Global application state.
#[derive(Clone)]
pub struct AppState {
    greeting: Arc<str>,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Constructs a new [`AppState`].
    pub fn new(greeting: impl Into<Arc<str>>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            greeting: greeting.into(),
            metrics,
        }
    }

    /// Constructs a new [`AppState`] from the loaded configuration.
    pub fn from_config(config: &Config, metrics: Option<PrometheusHandle>) -> Self {
        Self::new(config.greeting_service_greeting.as_str(), metrics)
    }

    /// Returns the configured salutation.
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Returns the metrics handle, if metrics are enabled.
    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }
}

impl Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("greeting", &self.greeting)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
