//! Train record types shared by the store, service and handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `trains` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TrainRecord {
    /// Assigned by storage on insert.
    pub id: i32,
    #[schema(example = "2022-01-01")]
    pub train_date: String,
    pub platform: i32,
    pub start_point: String,
    pub end_point: String,
    #[schema(example = "10:00:00")]
    pub arrival_time: String,
    #[schema(example = "10:14:33")]
    pub departure_time: String,
}

/// Business fields of a train, required in full on create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrainInput {
    #[schema(example = "2022-01-01")]
    pub train_date: String,
    pub platform: i32,
    pub start_point: String,
    pub end_point: String,
    #[schema(example = "10:00:00")]
    pub arrival_time: String,
    #[schema(example = "10:14:33")]
    pub departure_time: String,
}

impl TrainInput {
    pub fn into_record(self, id: i32) -> TrainRecord {
        TrainRecord {
            id,
            train_date: self.train_date,
            platform: self.platform,
            start_point: self.start_point,
            end_point: self.end_point,
            arrival_time: self.arrival_time,
            departure_time: self.departure_time,
        }
    }
}

/// Row captured before a delete, with the count the delete statement reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletedTrain {
    pub train: TrainRecord,
    pub rows_affected: u64,
}
