//! Router assembly.

pub mod common;
pub mod trains;

pub use common::common_routes_with_ready;
pub use trains::train_routes;

use crate::docs::ApiDoc;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> AppError {
    AppError::Body {
        status: StatusCode::NOT_FOUND,
        message: "Not Found".into(),
    }
}

async fn method_not_allowed() -> AppError {
    AppError::Body {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method Not Allowed".into(),
    }
}

/// Full application: train routes, health/ready/version, `/openapi.json`,
/// request tracing and a body size limit. Unknown paths and methods answer
/// with the same `{"detail": ...}` body as every other error.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(train_routes(state.clone()))
        .merge(common_routes_with_ready(state))
        .route("/openapi.json", get(openapi))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
}
