//! Train records: CRUD REST service over a PostgreSQL `trains` table.

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{DeletedTrain, TrainInput, TrainRecord};
pub use routes::{app, common_routes_with_ready, train_routes};
pub use service::TrainService;
pub use state::AppState;
pub use store::{detect_temporal_columns, ensure_trains_table, MemoryTrainStore, PgTrainStore, TrainStore};
