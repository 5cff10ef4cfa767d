use crate::application::ports::{Geolocator, QueueStore};
use crate::application::services::DashboardAggregator;
use crate::domain::entities::PendingRecord;
use crate::domain::value_objects::{GeoPoint, QueueKind, RecordPayload, TargetId};
use crate::shared::error::AppError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Creates pending records: appends them to the durable queue and
/// registers the optimistic dashboard entry. The only write path into
/// either.
pub struct CaptureService {
    queues: Arc<dyn QueueStore>,
    dashboard: Arc<DashboardAggregator>,
    geolocator: Arc<dyn Geolocator>,
    location_timeout: Duration,
}

impl CaptureService {
    pub fn new(
        queues: Arc<dyn QueueStore>,
        dashboard: Arc<DashboardAggregator>,
        geolocator: Arc<dyn Geolocator>,
        location_timeout: Duration,
    ) -> Self {
        Self {
            queues,
            dashboard,
            geolocator,
            location_timeout,
        }
    }

    /// Capture a survey response. A location fix is optional garnish:
    /// when none can be had within the bounded wait, the response is
    /// captured without one rather than blocking.
    pub async fn capture_response(
        &self,
        survey_id: TargetId,
        answers: RecordPayload,
        want_location: bool,
    ) -> Result<PendingRecord, AppError> {
        let location = if want_location {
            self.best_effort_fix().await
        } else {
            None
        };
        let record = PendingRecord::new(QueueKind::Responses, survey_id, answers, location);
        self.enqueue(record).await
    }

    /// Capture a surveyor location ping. Unlike responses, a ping is
    /// meaningless without coordinates, so a missing fix is an error.
    pub async fn capture_location_ping(
        &self,
        badge_id: TargetId,
    ) -> Result<PendingRecord, AppError> {
        let fix = self.best_effort_fix().await.ok_or_else(|| {
            AppError::ValidationError("No location fix available for ping".to_string())
        })?;
        let payload = RecordPayload::new(json!({
            "latitude": fix.latitude,
            "longitude": fix.longitude,
        }))
        .map_err(AppError::ValidationError)?;
        let record = PendingRecord::new(QueueKind::LocationPings, badge_id, payload, Some(fix));
        self.enqueue(record).await
    }

    async fn enqueue(&self, record: PendingRecord) -> Result<PendingRecord, AppError> {
        self.queues.append(record.kind, record.clone()).await?;
        self.dashboard.record_captured(record.clone()).await;
        Ok(record)
    }

    async fn best_effort_fix(&self) -> Option<GeoPoint> {
        match tokio::time::timeout(self.location_timeout, self.geolocator.current_position()).await
        {
            Ok(Ok(fix)) => Some(fix),
            Ok(Err(err)) => {
                warn!(error = %err, "Geolocation unavailable, proceeding without a fix");
                None
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.location_timeout.as_secs(),
                    "Geolocation timed out, proceeding without a fix"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RemoteGateway;
    use crate::domain::entities::{RemoteRecord, SurveyRecord};
    use crate::domain::value_objects::RetryState;
    use crate::infrastructure::storage::{init_schema, SqliteQueueStore};
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;

    struct NullGateway;

    #[async_trait]
    impl RemoteGateway for NullGateway {
        async fn insert_record(&self, _record: &PendingRecord) -> Result<RemoteRecord, AppError> {
            Err(AppError::Network("offline".into()))
        }

        async fn fetch_responses(&self) -> Result<Vec<RemoteRecord>, AppError> {
            Ok(Vec::new())
        }

        async fn fetch_surveys(&self) -> Result<Vec<SurveyRecord>, AppError> {
            Ok(Vec::new())
        }
    }

    struct FixedGeolocator(Result<GeoPoint, ()>);

    #[async_trait]
    impl Geolocator for FixedGeolocator {
        async fn current_position(&self) -> Result<GeoPoint, AppError> {
            match self.0 {
                Ok(fix) => Ok(fix),
                Err(()) => Err(AppError::Internal("no gps".into())),
            }
        }
    }

    /// Never resolves; exercises the bounded wait.
    struct StalledGeolocator;

    #[async_trait]
    impl Geolocator for StalledGeolocator {
        async fn current_position(&self) -> Result<GeoPoint, AppError> {
            std::future::pending().await
        }
    }

    async fn setup(geolocator: Arc<dyn Geolocator>) -> (CaptureService, Arc<SqliteQueueStore>) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        let store = Arc::new(SqliteQueueStore::new(pool));
        let dashboard = Arc::new(DashboardAggregator::new(Arc::new(NullGateway)));
        let service = CaptureService::new(
            store.clone(),
            dashboard,
            geolocator,
            Duration::from_millis(50),
        );
        (service, store)
    }

    fn answers() -> RecordPayload {
        RecordPayload::from_json_str(r#"{"q1":"yes"}"#).unwrap()
    }

    fn survey() -> TargetId {
        TargetId::new("s1".into()).unwrap()
    }

    #[tokio::test]
    async fn captured_response_is_queued_and_pending() {
        let fix = GeoPoint::new(35.6, 139.7).unwrap();
        let (service, store) = setup(Arc::new(FixedGeolocator(Ok(fix)))).await;

        let record = service
            .capture_response(survey(), answers(), true)
            .await
            .unwrap();
        assert_eq!(record.retry_state, RetryState::Pending);
        assert_eq!(record.location, Some(fix));

        let queued = store.load(QueueKind::Responses).await.unwrap();
        assert_eq!(queued, vec![record]);
    }

    #[tokio::test]
    async fn response_capture_survives_geolocation_timeout() {
        let (service, store) = setup(Arc::new(StalledGeolocator)).await;

        let record = service
            .capture_response(survey(), answers(), true)
            .await
            .unwrap();
        assert_eq!(record.location, None);
        assert_eq!(store.load(QueueKind::Responses).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn location_ping_requires_a_fix() {
        let (service, store) = setup(Arc::new(FixedGeolocator(Err(())))).await;

        let badge = TargetId::new("badge-7".into()).unwrap();
        let err = service.capture_location_ping(badge).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(store
            .load(QueueKind::LocationPings)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn location_ping_payload_carries_the_coordinates() {
        let fix = GeoPoint::new(-12.05, -77.04).unwrap();
        let (service, store) = setup(Arc::new(FixedGeolocator(Ok(fix)))).await;

        let badge = TargetId::new("badge-7".into()).unwrap();
        let record = service.capture_location_ping(badge).await.unwrap();
        assert_eq!(record.kind, QueueKind::LocationPings);
        assert_eq!(record.payload.as_json()["latitude"], -12.05);

        let queued = store.load(QueueKind::LocationPings).await.unwrap();
        assert_eq!(queued, vec![record]);
    }
}
