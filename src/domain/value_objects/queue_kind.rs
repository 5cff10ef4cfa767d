use serde::{Deserialize, Serialize};

/// The two durable queues, one storage key each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    Responses,
    LocationPings,
}

impl QueueKind {
    pub const ALL: [QueueKind; 2] = [QueueKind::Responses, QueueKind::LocationPings];

    pub fn storage_key(&self) -> &'static str {
        match self {
            QueueKind::Responses => "pending_responses",
            QueueKind::LocationPings => "pending_location_pings",
        }
    }
}
