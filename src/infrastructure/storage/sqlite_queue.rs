use crate::application::ports::QueueStore;
use crate::domain::entities::PendingRecord;
use crate::domain::value_objects::QueueKind;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};
use tracing::warn;

/// Durable queue over SQLite: one row per queue kind, the payload a
/// JSON-serialized array of pending records. The upsert replaces the
/// whole array in one statement, so a partially written queue can never
/// be observed.
pub struct SqliteQueueStore {
    pool: Pool<Sqlite>,
}

pub async fn init_schema(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS offline_queue (
            queue_key TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

impl SqliteQueueStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn load(&self, kind: QueueKind) -> Result<Vec<PendingRecord>, AppError> {
        let row = sqlx::query("SELECT payload FROM offline_queue WHERE queue_key = ?1")
            .bind(kind.storage_key())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };
        let payload: String = row.try_get("payload")?;

        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(err) => {
                // Corrupt storage must not take the caller down; records
                // confirmed remotely are recoverable through refetch.
                warn!(
                    queue_key = kind.storage_key(),
                    error = %err,
                    "Persisted queue unparseable, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, kind: QueueKind, records: &[PendingRecord]) -> Result<(), AppError> {
        let payload = serde_json::to_string(records)?;
        sqlx::query(
            r#"
            INSERT INTO offline_queue (queue_key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(queue_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(kind.storage_key())
        .bind(&payload)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
