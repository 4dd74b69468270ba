//! Custom axum extractors.

use super::error::ClientError;
use axum::{async_trait, extract::FromRequestParts};
use http::request::Parts;
use serde::de::DeserializeOwned;

/// A custom Path extractor since axum's does not let us customize the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ClientError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let res = axum::extract::Path::from_request_parts(parts, state).await?;
        Ok(Path(res.0))
    }
}
