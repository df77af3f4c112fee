//! Server: loads config from env / `.env`, connects the pool, ensures the trains table, serves the API.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use train_records::{app, detect_temporal_columns, ensure_trains_table, AppConfig, AppState, PgTrainStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("train_records=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let pool = config.db.connect().await?;
    if config.storage.ensure_table {
        ensure_trains_table(&pool, &config.storage.schema).await?;
    }

    let temporal_casts = if config.storage.temporal_casts {
        true
    } else {
        let detected = detect_temporal_columns(&pool, &config.storage.schema).await?;
        if detected {
            tracing::info!(schema = %config.storage.schema, "trains table has DATE/TIME columns, binding with casts");
        }
        detected
    };

    let store = PgTrainStore::new(pool, &config.storage.schema, temporal_casts);
    let state = AppState::new(store);
    let router = app(state, config.server.max_body_bytes);

    let listener = TcpListener::bind(config.server.bind).await?;
    tracing::info!(schema = %config.storage.schema, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
