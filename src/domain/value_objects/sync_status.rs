use serde::{Deserialize, Serialize};

/// Server-side status of a confirmed record. The client only ever reads
/// `synced` back today; unknown values round-trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Synced,
    #[serde(untagged)]
    Unknown(String),
}

impl SyncStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::Unknown(value) => value.as_str(),
        }
    }
}

impl From<&str> for SyncStatus {
    fn from(value: &str) -> Self {
        match value {
            "synced" => SyncStatus::Synced,
            other => SyncStatus::Unknown(other.to_string()),
        }
    }
}
