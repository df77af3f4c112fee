//! Response envelopes for the train endpoints.

use crate::model::{DeletedTrain, TrainRecord};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub const USAGE_MESSAGE: &str =
    "Please use /trains, /trains/id/{id}, /trains/platform/{platform}, or /trains/end_point/{end_point}.";

#[derive(Serialize, ToSchema)]
pub struct UsageMessage {
    pub message: String,
}

/// Body of a successful create or update.
#[derive(Serialize, ToSchema)]
pub struct TrainMessage {
    pub message: String,
    pub train: TrainRecord,
}

/// Body of a successful delete.
#[derive(Serialize, ToSchema)]
pub struct DeletedTrainMessage {
    pub message: String,
    pub deleted_train: TrainRecord,
    pub rows_affected: u64,
}

/// `{"detail": ...}` as documented in the OpenAPI schema.
#[derive(Serialize, ToSchema)]
pub struct ErrorMessage {
    pub detail: String,
}

pub fn usage() -> Json<UsageMessage> {
    Json(UsageMessage {
        message: USAGE_MESSAGE.to_string(),
    })
}

pub fn created(train: TrainRecord) -> Json<TrainMessage> {
    Json(TrainMessage {
        message: "Train created successfully".to_string(),
        train,
    })
}

pub fn updated(train: TrainRecord) -> Json<TrainMessage> {
    Json(TrainMessage {
        message: "Train updated successfully".to_string(),
        train,
    })
}

pub fn deleted(deleted: DeletedTrain) -> Json<DeletedTrainMessage> {
    Json(DeletedTrainMessage {
        message: "Train deleted successfully".to_string(),
        deleted_train: deleted.train,
        rows_affected: deleted.rows_affected,
    })
}
