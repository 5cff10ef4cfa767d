use crate::domain::entities::{PendingRecord, RemoteRecord, SurveyRecord};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Row-level access to the authoritative remote store.
///
/// `insert_record` failures must be distinguishable: `AppError::Network`
/// for transport problems (retried indefinitely), `ValidationError` for
/// content the service refuses (bounded retry, then quarantine), and
/// `Unauthorized` for credential problems.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn insert_record(&self, record: &PendingRecord) -> Result<RemoteRecord, AppError>;

    async fn fetch_responses(&self) -> Result<Vec<RemoteRecord>, AppError>;

    async fn fetch_surveys(&self) -> Result<Vec<SurveyRecord>, AppError>;
}
