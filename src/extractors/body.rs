//! Extract a validated `TrainInput` from a JSON request body.

use crate::error::{AppError, FieldError};
use crate::model::TrainInput;
use crate::service::RequestValidator;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Extractor for the create/update body. Rejects with field-level detail
/// before any handler code runs.
#[derive(Clone, Debug)]
pub struct TrainBody(pub TrainInput);

#[async_trait]
impl<S> FromRequest<S> for TrainBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Body {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Validation(vec![FieldError::whole_body(
                "json_invalid",
                format!("JSON decode error: {}", e),
            )])
        })?;
        RequestValidator::train_input(&value).map(TrainBody)
    }
}
