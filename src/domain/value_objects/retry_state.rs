use serde::{Deserialize, Serialize};
use std::fmt;

/// Retry bookkeeping for a pending record. Validation rejections advance
/// the counter; at the configured limit the record is quarantined so a
/// permanently invalid record cannot clog the queue forever. Network
/// failures never advance it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum RetryState {
    Pending,
    Retrying(u32),
    Quarantined(String),
}

impl RetryState {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryState::Pending => 0,
            RetryState::Retrying(n) => *n,
            RetryState::Quarantined(_) => u32::MAX,
        }
    }

    pub fn is_quarantined(&self) -> bool {
        matches!(self, RetryState::Quarantined(_))
    }

    /// Next state after a validation rejection.
    pub fn rejected(&self, max_retries: u32, reason: &str) -> RetryState {
        match self {
            RetryState::Quarantined(existing) => RetryState::Quarantined(existing.clone()),
            state => {
                let attempts = state.attempts() + 1;
                if attempts >= max_retries {
                    RetryState::Quarantined(reason.to_string())
                } else {
                    RetryState::Retrying(attempts)
                }
            }
        }
    }
}

impl fmt::Display for RetryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryState::Pending => write!(f, "pending"),
            RetryState::Retrying(n) => write!(f, "retrying:{}", n),
            RetryState::Quarantined(reason) => write!(f, "quarantined:{}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_advances_until_quarantine() {
        let state = RetryState::Pending;
        let state = state.rejected(3, "bad field");
        assert_eq!(state, RetryState::Retrying(1));
        let state = state.rejected(3, "bad field");
        assert_eq!(state, RetryState::Retrying(2));
        let state = state.rejected(3, "bad field");
        assert_eq!(state, RetryState::Quarantined("bad field".to_string()));
    }

    #[test]
    fn quarantine_is_terminal() {
        let state = RetryState::Quarantined("first".to_string());
        assert_eq!(
            state.rejected(3, "second"),
            RetryState::Quarantined("first".to_string())
        );
    }
}
