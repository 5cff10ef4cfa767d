use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote collections served by the push channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Surveys,
    Responses,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Surveys, Collection::Responses];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Surveys => "surveys",
            Collection::Responses => "responses",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
