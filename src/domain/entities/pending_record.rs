use crate::domain::value_objects::{
    GeoPoint, LocalId, QueueKind, RecordPayload, RetryState, TargetId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured response or location ping awaiting remote confirmation.
/// The captured content never changes after creation; only `retry_state`
/// advances between reconciliation passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingRecord {
    pub local_id: LocalId,
    pub kind: QueueKind,
    pub target_id: TargetId,
    pub payload: RecordPayload,
    pub location: Option<GeoPoint>,
    pub captured_at: DateTime<Utc>,
    pub retry_state: RetryState,
}

impl PendingRecord {
    pub fn new(
        kind: QueueKind,
        target_id: TargetId,
        payload: RecordPayload,
        location: Option<GeoPoint>,
    ) -> Self {
        Self {
            local_id: LocalId::generate(),
            kind,
            target_id,
            payload,
            location,
            captured_at: Utc::now(),
            retry_state: RetryState::Pending,
        }
    }

    /// Copy with the retry counter advanced after a validation rejection.
    pub fn rejected(&self, max_retries: u32, reason: &str) -> Self {
        let mut next = self.clone();
        next.retry_state = self.retry_state.rejected(max_retries, reason);
        next
    }

    pub fn is_quarantined(&self) -> bool {
        self.retry_state.is_quarantined()
    }
}
