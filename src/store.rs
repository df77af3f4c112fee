//! Storage seam: the `TrainStore` trait with PostgreSQL and in-process implementations.

mod memory;
mod postgres;

pub use memory::MemoryTrainStore;
pub use postgres::{detect_temporal_columns, ensure_trains_table, PgTrainStore};

use crate::model::{DeletedTrain, TrainInput, TrainRecord};
use async_trait::async_trait;

/// Row access for the trains table. Every method is one unit of work against storage.
#[async_trait]
pub trait TrainStore: Send + Sync {
    async fn list_all(&self) -> sqlx::Result<Vec<TrainRecord>>;

    async fn find_by_id(&self, id: i32) -> sqlx::Result<Option<TrainRecord>>;

    async fn find_by_platform(&self, platform: i32) -> sqlx::Result<Vec<TrainRecord>>;

    async fn find_by_end_point(&self, end_point: &str) -> sqlx::Result<Vec<TrainRecord>>;

    /// Insert and return the stored row, including its generated id.
    async fn insert(&self, input: &TrainInput) -> sqlx::Result<TrainRecord>;

    /// Overwrite all business fields of an existing row.
    /// `None` when the id is absent or the update touched no row.
    async fn update_existing(&self, id: i32, input: &TrainInput) -> sqlx::Result<Option<TrainRecord>>;

    /// Capture and delete an existing row.
    /// `None` when the id is absent or the delete affected zero rows.
    async fn delete_existing(&self, id: i32) -> sqlx::Result<Option<DeletedTrain>>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> sqlx::Result<()>;
}
