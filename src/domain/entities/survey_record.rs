use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A survey definition as served by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyRecord {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}
