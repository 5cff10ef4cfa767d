mod collection;
mod geo_point;
mod local_id;
mod queue_kind;
mod record_payload;
mod retry_state;
mod sync_status;
mod target_id;

pub use collection::Collection;
pub use geo_point::GeoPoint;
pub use local_id::LocalId;
pub use queue_kind::QueueKind;
pub use record_payload::RecordPayload;
pub use retry_state::RetryState;
pub use sync_status::SyncStatus;
pub use target_id::TargetId;
