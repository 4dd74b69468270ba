//! OpenAPI configuration.

use crate::api::{hello::hello_api, info::info_api};
use crate::core::greeting::greeting_service;
use axum::Json;
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(info_api::info, hello_api::say_hello),
    components(schemas(
        info_api::AppInfo,
        greeting_service::Greeting,
        crate::infra::error::ErrorBody
    ))
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;

/// Serves the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
