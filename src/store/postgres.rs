//! `TrainStore` over a sqlx PostgreSQL pool.

use super::TrainStore;
use crate::model::{DeletedTrain, TrainInput, TrainRecord};
use crate::sql::{ColumnKind, TrainStatements, BUSINESS_COLUMNS, TRAINS_TABLE};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgTrainStore {
    pool: PgPool,
    statements: TrainStatements,
}

impl PgTrainStore {
    pub fn new(pool: PgPool, schema: &str, temporal_casts: bool) -> Self {
        PgTrainStore {
            pool,
            statements: TrainStatements::new(schema, temporal_casts),
        }
    }
}

/// Binds the six business fields as $1..$6, in column order.
fn bind_input<'q>(
    query: QueryAs<'q, Postgres, TrainRecord, PgArguments>,
    input: &'q TrainInput,
) -> QueryAs<'q, Postgres, TrainRecord, PgArguments> {
    query
        .bind(&input.train_date)
        .bind(input.platform)
        .bind(&input.start_point)
        .bind(&input.end_point)
        .bind(&input.arrival_time)
        .bind(&input.departure_time)
}

#[async_trait]
impl TrainStore for PgTrainStore {
    async fn list_all(&self) -> sqlx::Result<Vec<TrainRecord>> {
        let sql = &self.statements.select_all;
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, TrainRecord>(sql).fetch_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i32) -> sqlx::Result<Option<TrainRecord>> {
        let sql = &self.statements.select_by_id;
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, TrainRecord>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_platform(&self, platform: i32) -> sqlx::Result<Vec<TrainRecord>> {
        let sql = &self.statements.select_by_platform;
        tracing::debug!(sql = %sql, platform, "query");
        sqlx::query_as::<_, TrainRecord>(sql)
            .bind(platform)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_end_point(&self, end_point: &str) -> sqlx::Result<Vec<TrainRecord>> {
        let sql = &self.statements.select_by_end_point;
        tracing::debug!(sql = %sql, end_point, "query");
        sqlx::query_as::<_, TrainRecord>(sql)
            .bind(end_point)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert(&self, input: &TrainInput) -> sqlx::Result<TrainRecord> {
        let sql = &self.statements.insert;
        tracing::debug!(sql = %sql, params = ?input, "query");
        let mut tx = self.pool.begin().await?;
        let row = bind_input(sqlx::query_as::<_, TrainRecord>(sql), input)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update_existing(&self, id: i32, input: &TrainInput) -> sqlx::Result<Option<TrainRecord>> {
        let mut tx = self.pool.begin().await?;

        tracing::debug!(sql = %self.statements.lock_id, id, "query (tx)");
        let exists: Option<(i32,)> = sqlx::query_as(&self.statements.lock_id)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        tracing::debug!(sql = %self.statements.update, id, params = ?input, "query (tx)");
        let row = bind_input(sqlx::query_as::<_, TrainRecord>(&self.statements.update), input)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        match row {
            Some(row) => {
                tx.commit().await?;
                Ok(Some(row))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    async fn delete_existing(&self, id: i32) -> sqlx::Result<Option<DeletedTrain>> {
        let mut tx = self.pool.begin().await?;

        tracing::debug!(sql = %self.statements.lock_row, id, "query (tx)");
        let existing = sqlx::query_as::<_, TrainRecord>(&self.statements.lock_row)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(train) = existing else {
            tx.rollback().await?;
            return Ok(None);
        };

        tracing::debug!(sql = %self.statements.delete, id, "query (tx)");
        let rows_affected = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if rows_affected == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        Ok(Some(DeletedTrain { train, rows_affected }))
    }

    async fn ping(&self) -> sqlx::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the trains table in `schema` if it does not exist yet.
pub async fn ensure_trains_table(pool: &PgPool, schema: &str) -> sqlx::Result<()> {
    let statements = TrainStatements::new(schema, false);
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema.replace('"', "\"\"")))
        .execute(pool)
        .await?;
    sqlx::query(&statements.create_table).execute(pool).await?;
    tracing::info!(schema, "trains table ensured");
    Ok(())
}

/// Whether any date/time column of an existing trains table is typed `DATE`/`TIME`
/// rather than text. Such tables need the `::date` / `::time` placeholder casts.
pub async fn detect_temporal_columns(pool: &PgPool, schema: &str) -> sqlx::Result<bool> {
    let sql = "SELECT column_name::text, data_type::text FROM information_schema.columns \
               WHERE table_schema = $1 AND table_name = $2";
    tracing::debug!(sql, schema, "query");
    let columns: Vec<(String, String)> = sqlx::query_as(sql)
        .bind(schema)
        .bind(TRAINS_TABLE)
        .fetch_all(pool)
        .await?;
    Ok(columns.iter().any(|(name, data_type)| {
        let temporal = BUSINESS_COLUMNS
            .iter()
            .any(|(col, kind)| *col == name.as_str() && matches!(kind, ColumnKind::Date | ColumnKind::Time));
        temporal && (data_type == "date" || data_type.starts_with("time"))
    }))
}
