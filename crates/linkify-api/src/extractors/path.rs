//! Path parameter extractor
//!
//! Type-safe extraction of a Snowflake ID from the `:id` style path segment.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use linkify_core::Snowflake;

use crate::response::ApiError;

/// A single Snowflake path parameter, whatever the segment is named
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        raw.parse::<Snowflake>()
            .map(IdPath)
            .map_err(|_| ApiError::invalid_path(format!("Invalid id format: {raw}")))
    }
}
