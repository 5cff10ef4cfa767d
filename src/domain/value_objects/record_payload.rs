use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque key -> value mapping of captured field answers, or the lat/long
/// pair of a location ping. Must be a JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordPayload(Value);

impl RecordPayload {
    pub fn new(value: Value) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON payload: {e}"))?;
        Self::new(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    fn validate(value: &Value) -> Result<(), String> {
        if !value.is_object() {
            return Err("Record payload must be a JSON object".to_string());
        }
        Ok(())
    }
}

impl From<RecordPayload> for Value {
    fn from(payload: RecordPayload) -> Self {
        payload.0
    }
}
