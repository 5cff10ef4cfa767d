use crate::domain::entities::ChangeEvent;
use crate::domain::value_objects::{Collection, TargetId};
use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("subscription rejected: {0}")]
    Rejected(String),
    #[error("channel disconnected: {0}")]
    Disconnected(String),
}

pub type ChangeStream = BoxStream<'static, ChangeEvent>;

/// Push subscription delivering insert/update/delete events for one
/// collection, optionally filtered by target id. Dropping the stream
/// releases the subscription.
#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    async fn subscribe(
        &self,
        collection: Collection,
        filter: Option<TargetId>,
    ) -> Result<ChangeStream, ChannelError>;
}
