//! Implementation of the hello API. An API that greets whoever is named in the path.

use crate::{
    core::greeting::greeting_service::{self, Greeting},
    infra::{
        extract::Path,
        metrics::{CallTimer, SAY_HELLO_TIME},
        state::AppState,
    },
};
use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

/// The hello API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().route("/hello/:name", get(say_hello))
}

/// Greets `name` with the configured salutation.
#[utoipa::path(
    get,
    path = "/hello/{name}",
    params(
        ("name" = String, Path, description = "Who to greet"),
    ),
    responses(
        (status = 200, description = "Success", body = Greeting),
    )
)]
#[instrument(skip(state))]
pub async fn say_hello(State(state): State<AppState>, Path(name): Path<String>) -> Json<Greeting> {
    let _timer = CallTimer::start(&SAY_HELLO_TIME);
    Json(greeting_service::greet(state.greeting(), &name))
}
