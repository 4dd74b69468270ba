//! The axum application.
//!
//! # Examples
//!
//! Hello API.
//!
//! ```rust
//! # use greeting_service::core::greeting::greeting_service::Greeting;
//! # tokio_test::block_on(async {
//! # let url = greeting_service::app::spawn_app().await;
//! let response = reqwest::get(format!("{}/hello/World", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! let greeting = response.json::<Greeting>().await.unwrap();
//! assert_eq!("World", greeting.name());
//! # });
//! ```
//!
//! Unknown routes.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = greeting_service::app::spawn_app().await;
//! let response = reqwest::get(format!("{}/hello/", url)).await.unwrap();
//! assert_eq!(404, response.status());
//! # });
//! ```

use crate::infra::config::{self, ServerConfig};
use crate::infra::error::{handle_middleware_error, not_found, PanicHandler};
use crate::infra::middleware::{log_request_response, MakeRequestIdSpan};
use crate::infra::openapi::{openapi_json, ApiDoc};
use crate::infra::shutdown::shutdown_signal;
use crate::infra::state::AppState;
use axum::error_handling::HandleErrorLayer;
use axum::routing::get;
use axum::Router;
use http::header::AUTHORIZATION;
use std::iter;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

/// Constructs the full axum application.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(server.request_timeout)
        .concurrency_limit(server.concurrency_limit);

    Router::new()
        .merge(crate::api::api())
        // API documentation
        .route("/api/openapi.json", get(openapi_json))
        .merge(Redoc::with_url("/api/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api/openapi.json").path("/api/rapidoc"))
        .fallback(not_found)
        .with_state(state)
        // Layers
        .layer(axum::middleware::from_fn(log_request_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new(iter::once(
            AUTHORIZATION,
        )))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server and serves until ctrl-c is pressed.
pub async fn run_app(
    listener: TcpListener,
    state: AppState,
    server: ServerConfig,
) -> std::io::Result<()> {
    let app = app(state, &server).into_make_service();

    tracing::info!("Starting axum on {:?}", listener.local_addr());
    let exit_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    match &exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    exit_result
}

/// Spawn a server on a random port, configured from the environment.
pub async fn spawn_app() -> String {
    let config = config::load_config().unwrap();
    let state = AppState::from_config(&config, None);
    spawn_app_with_state(state, config.server).await
}

/// Spawn a server on a random port with a custom state.
pub async fn spawn_app_with_state(state: AppState, server: ServerConfig) -> String {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(run_app(listener, state, server));
    format!("http://{address}:{port}")
}
