use super::{PendingRecord, RemoteRecord, SurveyRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the merged dashboard view. Keyed by local id while
/// unconfirmed, by server id once confirmed; a logical record is never
/// present under both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "entry")]
pub enum DashboardEntry {
    Pending(PendingRecord),
    Confirmed(RemoteRecord),
}

impl DashboardEntry {
    pub fn identity(&self) -> &str {
        match self {
            DashboardEntry::Pending(record) => record.local_id.as_str(),
            DashboardEntry::Confirmed(record) => record.id.as_str(),
        }
    }
}

/// Read model handed to UI and export consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub records: Vec<DashboardEntry>,
    pub surveys: Vec<SurveyRecord>,
    pub pending_count: u32,
    pub synced_count: u32,
    pub quarantined_count: u32,
    pub new_since_last_view: u32,
    pub last_update: Option<DateTime<Utc>>,
}
