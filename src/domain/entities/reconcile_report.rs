use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// A full pass ran over every queue.
    Completed,
    /// No authenticated identity; nothing was attempted and the queues
    /// are untouched. Connectivity may be fine.
    AuthUnavailable,
    /// Another pass was already in flight; this call was a no-op.
    AlreadyRunning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconcileReport {
    pub committed: u32,
    pub still_pending: u32,
    pub quarantined: u32,
    pub outcome: ReconcileOutcome,
}

impl ReconcileReport {
    pub fn skipped(outcome: ReconcileOutcome) -> Self {
        Self {
            committed: 0,
            still_pending: 0,
            quarantined: 0,
            outcome,
        }
    }
}
