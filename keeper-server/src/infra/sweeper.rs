use std::time::Duration;

use keeper_core::StagedFileStore;
use tokio::task::JoinHandle;
use tracing::warn;

/// Periodically removes staged feedback older than `max_age`.
///
/// The first tick fires immediately, so leftovers from a crashed run are
/// cleared at startup.
pub fn spawn_staging_sweeper(
    store: StagedFileStore,
    max_age: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(err) = store.sweep_stale(max_age).await {
                warn!(error = %err, "staging sweep failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_core::FeedbackKey;
    use keeper_core::ports::FeedbackNamespace;
    use keeper_core::testing::InMemoryFeedbackNamespace;
    use std::sync::Arc;

    #[tokio::test]
    async fn first_tick_sweeps_leftovers() {
        let namespace = Arc::new(InMemoryFeedbackNamespace::default());
        let key = FeedbackKey::normalize(Some("orphan")).unwrap();
        namespace.stage(&key, b"left behind").await.unwrap();
        assert_eq!(namespace.staged_count().await, 1);

        let store = StagedFileStore::new(namespace.clone());
        let handle = spawn_staging_sweeper(
            store,
            Duration::ZERO,
            Duration::from_secs(3600),
        );

        for _ in 0..50 {
            if namespace.staged_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert_eq!(namespace.staged_count().await, 0);
    }
}
