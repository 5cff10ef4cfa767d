use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Client-generated identity of a captured record: millisecond timestamp
/// plus a random suffix. Sole identity until remote confirmation, and the
/// reconciliation key echoed back by the remote write acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LocalId(String);

impl LocalId {
    pub fn generate() -> Self {
        Self(format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Local id cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
