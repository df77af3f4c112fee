//! Typed errors and HTTP mapping.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Header carrying a human-readable description of the operation that failed.
pub const ERROR_HEADER: &str = "X-Error";

/// Fixed detail for a missing train.
pub const NOT_FOUND_DETAIL: &str = "Train not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Operation a storage failure happened in. Drives the `X-Error` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn describe(self) -> &'static str {
        match self {
            Operation::List => "An error occurred while fetching the trains.",
            Operation::Fetch => "An error occurred while fetching the train.",
            Operation::Create => "An error occurred while creating the train.",
            Operation::Update => "An error occurred while updating the train.",
            Operation::Delete => "An error occurred while deleting the train.",
        }
    }
}

/// One field-level validation problem, shaped like `{"loc", "msg", "type"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn body(field: &str, kind: &'static str, msg: impl Into<String>) -> Self {
        FieldError {
            loc: vec!["body".into(), field.into()],
            msg: msg.into(),
            kind,
        }
    }

    pub fn path(field: &str, kind: &'static str, msg: impl Into<String>) -> Self {
        FieldError {
            loc: vec!["path".into(), field.into()],
            msg: msg.into(),
            kind,
        }
    }

    /// Error about the request body as a whole (not JSON, not an object).
    pub fn whole_body(kind: &'static str, msg: impl Into<String>) -> Self {
        FieldError {
            loc: vec!["body".into()],
            msg: msg.into(),
            kind,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Train not found")]
    NotFound,
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error("{source}")]
    Storage {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Wraps a storage error with the operation it happened in. Used with `map_err`.
    pub fn storage(operation: Operation) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Storage { operation, source }
    }
}

#[derive(Serialize)]
pub struct ErrorBody<T> {
    pub detail: T,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    detail: NOT_FOUND_DETAIL,
                }),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody { detail: errors }),
            )
                .into_response(),
            AppError::Body { status, message } => {
                (status, Json(ErrorBody { detail: message })).into_response()
            }
            AppError::Storage { operation, source } => {
                tracing::error!(error = %source, operation = ?operation, "storage failure");
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        detail: source.to_string(),
                    }),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(ERROR_HEADER, HeaderValue::from_static(operation.describe()));
                response
            }
        }
    }
}
