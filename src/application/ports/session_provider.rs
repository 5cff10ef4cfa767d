use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
}

/// Source of the authenticated identity. Reconciliation short-circuits
/// when none is available instead of attempting writes that will
/// uniformly fail.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_identity(&self) -> Option<SessionIdentity>;
}
