use super::{RemoteRecord, SurveyRecord};
use crate::domain::value_objects::Collection;
use serde::{Deserialize, Serialize};

/// Row-level change notification delivered by the push channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "change")]
pub enum ChangeEvent {
    ResponseInserted(RemoteRecord),
    ResponseUpdated(RemoteRecord),
    ResponseDeleted { id: String },
    SurveyInserted(SurveyRecord),
    SurveyUpdated(SurveyRecord),
    SurveyDeleted { id: String },
}

impl ChangeEvent {
    pub fn collection(&self) -> Collection {
        match self {
            ChangeEvent::ResponseInserted(_)
            | ChangeEvent::ResponseUpdated(_)
            | ChangeEvent::ResponseDeleted { .. } => Collection::Responses,
            ChangeEvent::SurveyInserted(_)
            | ChangeEvent::SurveyUpdated(_)
            | ChangeEvent::SurveyDeleted { .. } => Collection::Surveys,
        }
    }
}
