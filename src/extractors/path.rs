//! Single path segment, with framework rejections reported as `{"detail": ...}`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Raw `{id}` / `{platform}` / `{end_point}` segment, percent-decoded.
#[derive(Clone, Debug)]
pub struct PathParam(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for PathParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Body {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        Ok(PathParam(value))
    }
}
