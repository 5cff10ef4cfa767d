use crate::domain::entities::PendingRecord;
use crate::domain::value_objects::QueueKind;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable, restart-surviving store of records awaiting confirmation.
/// The replace unit is the whole queue per kind; queue sizes are
/// field-survey scale, so O(n) writes are acceptable.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Persisted set for one queue, FIFO order. Missing or corrupt
    /// storage yields an empty set, never an error.
    async fn load(&self, kind: QueueKind) -> Result<Vec<PendingRecord>, AppError>;

    /// Atomically overwrite the entire persisted set for one queue.
    async fn save(&self, kind: QueueKind, records: &[PendingRecord]) -> Result<(), AppError>;

    async fn append(&self, kind: QueueKind, record: PendingRecord) -> Result<(), AppError> {
        let mut records = self.load(kind).await?;
        records.push(record);
        self.save(kind, &records).await
    }
}
