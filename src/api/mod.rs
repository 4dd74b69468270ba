//! The REST API.

use axum::{routing::get, Router};

use crate::infra::{metrics::metrics_handler, state::AppState};

pub mod hello;
pub mod info;

/// Constructs the REST API routes.
pub fn api() -> Router<AppState> {
    Router::new()
        .merge(info::info_api::routes())
        .merge(hello::hello_api::routes())
        .route("/metrics", get(metrics_handler))
}
