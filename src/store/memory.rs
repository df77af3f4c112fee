//! In-process `TrainStore`: rows kept in a map behind a mutex. Ids are assigned
//! like a `SERIAL` column, one past the highest id ever seen.

use super::TrainStore;
use crate::model::{DeletedTrain, TrainInput, TrainRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<i32, TrainRecord>,
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryTrainStore {
    rows: Mutex<Rows>,
    /// When set, every call fails with this message.
    failure: Option<String>,
}

impl MemoryTrainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing rows; their ids are kept as-is.
    pub fn with_rows(rows: impl IntoIterator<Item = TrainRecord>) -> Self {
        let mut state = Rows::default();
        for row in rows {
            state.last_id = state.last_id.max(row.id);
            state.by_id.insert(row.id, row);
        }
        MemoryTrainStore {
            rows: Mutex::new(state),
            failure: None,
        }
    }

    /// Empty store whose every operation returns a storage error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new().fail_with(message)
    }

    /// Make every trait operation on this store fail; rows stay in place.
    pub fn fail_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of stored rows, read past any configured failure.
    pub fn len(&self) -> usize {
        match self.rows.lock() {
            Ok(rows) => rows.by_id.len(),
            Err(poisoned) => poisoned.into_inner().by_id.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> sqlx::Result<MutexGuard<'_, Rows>> {
        if let Some(message) = &self.failure {
            return Err(sqlx::Error::Protocol(message.clone()));
        }
        self.rows
            .lock()
            .map_err(|_| sqlx::Error::Protocol("train store lock poisoned".into()))
    }

    fn filtered(&self, keep: impl Fn(&TrainRecord) -> bool) -> sqlx::Result<Vec<TrainRecord>> {
        Ok(self.rows()?.by_id.values().filter(|r| keep(*r)).cloned().collect())
    }
}

#[async_trait]
impl TrainStore for MemoryTrainStore {
    async fn list_all(&self) -> sqlx::Result<Vec<TrainRecord>> {
        self.filtered(|_| true)
    }

    async fn find_by_id(&self, id: i32) -> sqlx::Result<Option<TrainRecord>> {
        Ok(self.rows()?.by_id.get(&id).cloned())
    }

    async fn find_by_platform(&self, platform: i32) -> sqlx::Result<Vec<TrainRecord>> {
        self.filtered(|r| r.platform == platform)
    }

    async fn find_by_end_point(&self, end_point: &str) -> sqlx::Result<Vec<TrainRecord>> {
        self.filtered(|r| r.end_point == end_point)
    }

    async fn insert(&self, input: &TrainInput) -> sqlx::Result<TrainRecord> {
        let mut rows = self.rows()?;
        let id = rows
            .last_id
            .checked_add(1)
            .ok_or_else(|| sqlx::Error::Protocol("trains id sequence exhausted".into()))?;
        rows.last_id = id;
        let record = input.clone().into_record(id);
        rows.by_id.insert(id, record.clone());
        Ok(record)
    }

    async fn update_existing(&self, id: i32, input: &TrainInput) -> sqlx::Result<Option<TrainRecord>> {
        let mut rows = self.rows()?;
        let Some(slot) = rows.by_id.get_mut(&id) else {
            return Ok(None);
        };
        *slot = input.clone().into_record(id);
        Ok(Some(slot.clone()))
    }

    async fn delete_existing(&self, id: i32) -> sqlx::Result<Option<DeletedTrain>> {
        let mut rows = self.rows()?;
        Ok(rows.by_id.remove(&id).map(|train| DeletedTrain {
            train,
            rows_affected: 1,
        }))
    }

    async fn ping(&self) -> sqlx::Result<()> {
        self.rows().map(|_| ())
    }
}
