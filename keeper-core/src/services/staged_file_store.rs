use std::{fmt, sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::domain::feedback::{FeedbackKey, FeedbackRecord};
use crate::error::{KeeperError, Result};
use crate::ports::{FeedbackNamespace, StagedFeedback};

/// One immutable object per normalized title, written stage-then-publish.
///
/// A submission moves `Received -> Staged -> Published | Rejected | Failed`.
/// Rejected and failed submissions discard their staged object; anything a
/// crash leaves behind is removed by [`StagedFileStore::sweep_stale`].
#[derive(Clone)]
pub struct StagedFileStore {
    namespace: Arc<dyn FeedbackNamespace>,
}

impl fmt::Debug for StagedFileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFileStore").finish_non_exhaustive()
    }
}

impl StagedFileStore {
    pub fn new(namespace: Arc<dyn FeedbackNamespace>) -> Self {
        Self { namespace }
    }

    pub fn normalize(title: Option<&str>) -> Result<FeedbackKey> {
        FeedbackKey::normalize(title)
    }

    pub async fn commit(
        &self,
        title: Option<&str>,
        content: &str,
    ) -> Result<FeedbackRecord> {
        let key = Self::normalize(title)?;

        let staged = self.namespace.stage(&key, content.as_bytes()).await?;
        debug!(key = %key, staging_id = %staged.staging_id, "feedback staged");

        // Fast path only; publish refuses to overwrite on its own.
        match self.namespace.exists(&key).await {
            Ok(true) => {
                self.discard(&staged).await;
                info!(key = %key, "feedback already exists");
                return Err(KeeperError::DuplicateIdentity(key.to_string()));
            }
            Ok(false) => {}
            Err(err) => {
                self.discard(&staged).await;
                return Err(err);
            }
        }

        match self.namespace.publish(&staged).await {
            Ok(()) => {
                info!(key = %key, "feedback published");
                Ok(FeedbackRecord {
                    key,
                    content: content.to_string(),
                })
            }
            Err(err) => {
                self.discard(&staged).await;
                if err.is_duplicate() {
                    info!(key = %key, "feedback published concurrently");
                } else {
                    warn!(key = %key, error = %err, "feedback publish failed");
                }
                Err(err)
            }
        }
    }

    pub async fn sweep_stale(&self, max_age: Duration) -> Result<usize> {
        let removed = self.namespace.sweep_stale(max_age).await?;
        if removed > 0 {
            info!(removed, "removed orphaned staged feedback");
        }
        Ok(removed)
    }

    async fn discard(&self, staged: &StagedFeedback) {
        if let Err(err) = self.namespace.discard(staged).await {
            warn!(
                key = %staged.key,
                staging_id = %staged.staging_id,
                error = %err,
                "failed to discard staged feedback; left for the sweeper"
            );
        }
    }
}
