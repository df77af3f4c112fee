//! The six train operations. Storage errors are tagged with the operation they
//! happened in; `NotFound` is produced here and passes through `?` untouched.

use crate::error::{AppError, Operation};
use crate::model::{DeletedTrain, TrainInput, TrainRecord};
use crate::store::TrainStore;

pub struct TrainService;

impl TrainService {
    /// All rows, ordered by id.
    pub async fn list(store: &dyn TrainStore) -> Result<Vec<TrainRecord>, AppError> {
        store.list_all().await.map_err(AppError::storage(Operation::List))
    }

    /// The matching row as a one-element sequence.
    pub async fn get_by_id(store: &dyn TrainStore, id: i32) -> Result<Vec<TrainRecord>, AppError> {
        let row = store
            .find_by_id(id)
            .await
            .map_err(AppError::storage(Operation::Fetch))?
            .ok_or(AppError::NotFound)?;
        Ok(vec![row])
    }

    /// Zero or more rows; an empty result is not an error.
    pub async fn get_by_platform(store: &dyn TrainStore, platform: i32) -> Result<Vec<TrainRecord>, AppError> {
        store
            .find_by_platform(platform)
            .await
            .map_err(AppError::storage(Operation::Fetch))
    }

    /// Zero or more rows; an empty result is not an error.
    pub async fn get_by_end_point(store: &dyn TrainStore, end_point: &str) -> Result<Vec<TrainRecord>, AppError> {
        store
            .find_by_end_point(end_point)
            .await
            .map_err(AppError::storage(Operation::Fetch))
    }

    pub async fn create(store: &dyn TrainStore, input: &TrainInput) -> Result<TrainRecord, AppError> {
        let row = store
            .insert(input)
            .await
            .map_err(AppError::storage(Operation::Create))?;
        tracing::info!(id = row.id, "train created");
        Ok(row)
    }

    pub async fn update(store: &dyn TrainStore, id: i32, input: &TrainInput) -> Result<TrainRecord, AppError> {
        let row = store
            .update_existing(id, input)
            .await
            .map_err(AppError::storage(Operation::Update))?
            .ok_or(AppError::NotFound)?;
        tracing::info!(id, "train updated");
        Ok(row)
    }

    /// Deletes and returns the captured row. Zero rows affected is `NotFound`,
    /// whatever the existence check said.
    pub async fn delete(store: &dyn TrainStore, id: i32) -> Result<DeletedTrain, AppError> {
        let deleted = store
            .delete_existing(id)
            .await
            .map_err(AppError::storage(Operation::Delete))?
            .ok_or(AppError::NotFound)?;
        if deleted.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, rows_affected = deleted.rows_affected, "train deleted");
        Ok(deleted)
    }
}
