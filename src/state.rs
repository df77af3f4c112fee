//! Shared application state for all routes. Holds no per-request data.

use crate::store::TrainStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TrainStore>,
}

impl AppState {
    pub fn new(store: impl TrainStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
