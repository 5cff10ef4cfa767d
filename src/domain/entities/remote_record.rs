use crate::domain::value_objects::{GeoPoint, LocalId, RecordPayload, SyncStatus, TargetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authoritative form of a record once accepted by the remote
/// service. Owned by the server; the client only reads it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteRecord {
    pub id: String,
    /// Reconciliation key: the local id sent with the insert, echoed back
    /// on the acknowledgment and on realtime insert events.
    pub client_ref: Option<LocalId>,
    pub target_id: TargetId,
    pub payload: RecordPayload,
    pub location: Option<GeoPoint>,
    pub sync_status: SyncStatus,
    pub created_at: DateTime<Utc>,
}
