//! Middleware for modifying requests and responses.

use crate::infra::error::{ApiError, ClientError};
use axum::{
    body::{Body, HttpBody as _},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http_body_util::BodyExt;
use tower_http::trace::MakeSpan;

static X_REQUEST_ID: &str = "x-request-id";

/// Creates a span that includes the request id and some request information.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MakeRequestIdSpan;

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|rid| rid.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

/// The maximum size of a body to log.
const MAX_BODY_SIZE: u64 = 8192;

/// Log small request and response bodies.
pub(crate) async fn log_request_response(
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let (parts, body) = req.into_parts();
    let body = if is_small(&body) {
        Body::from(buffer_and_print("Request", body).await?)
    } else {
        body
    };
    let req = Request::from_parts(parts, body);

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let body = if is_small(&body) {
        Body::from(buffer_and_print("Response", body).await?)
    } else {
        body
    };
    Ok(Response::from_parts(parts, body))
}

fn is_small(body: &Body) -> bool {
    body.size_hint()
        .upper()
        .is_some_and(|n| n <= MAX_BODY_SIZE)
}

/// Read the entire body stream and store it in memory.
async fn buffer_and_print(direction: &str, body: Body) -> Result<Bytes, ApiError> {
    // Try to read stream
    let bytes = body
        .collect()
        .await
        .map_err(|e| ClientError::BadRequest(format!("failed to read {direction} body: {e}")))?
        .to_bytes();

    // Log if valid text
    if let Ok(body) = std::str::from_utf8(&bytes) {
        tracing::trace!("{} body = {:?}", direction, body);
    }

    Ok(bytes)
}
