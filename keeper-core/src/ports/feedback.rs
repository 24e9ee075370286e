use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::feedback::FeedbackKey;
use crate::error::Result;

/// Handle to content written to the private staging area. Each submission
/// gets its own staging slot, so concurrent submissions for the same key
/// never share a staged object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFeedback {
    pub key: FeedbackKey,
    pub staging_id: Uuid,
}

impl StagedFeedback {
    pub fn new(key: FeedbackKey) -> Self {
        Self {
            key,
            staging_id: Uuid::new_v4(),
        }
    }
}

#[async_trait]
pub trait FeedbackNamespace: Send + Sync {
    /// Write `content` completely to a private location. Nothing becomes
    /// visible under the public key. Fails with `StageWriteFailed`.
    async fn stage(
        &self,
        key: &FeedbackKey,
        content: &[u8],
    ) -> Result<StagedFeedback>;

    /// Whether an object is committed under `key` in the public namespace.
    async fn exists(&self, key: &FeedbackKey) -> Result<bool>;

    /// Atomically expose the staged object under its key, without ever
    /// replacing an existing object. Fails with `DuplicateIdentity` if the
    /// key is already taken.
    async fn publish(&self, staged: &StagedFeedback) -> Result<()>;

    /// Drop a staged object that will not be published.
    async fn discard(&self, staged: &StagedFeedback) -> Result<()>;

    /// Remove staged objects older than `max_age`, returning how many were
    /// removed. These are left behind by interrupted submissions.
    async fn sweep_stale(&self, max_age: Duration) -> Result<usize>;
}
