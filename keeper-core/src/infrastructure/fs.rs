use std::{
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::feedback::FeedbackKey;
use crate::error::{KeeperError, Result};
use crate::ports::{FeedbackNamespace, StagedFeedback};

const STAGED_SUFFIX: &str = "staged";

/// Feedback namespace backed by two directories on the same filesystem.
///
/// Staged objects live in `staging` as `<staging_id>.staged`, a name whose
/// length does not depend on the key, so any key with a valid public name
/// can be staged. Publishing hard-links the staged inode to
/// `<public>/<key>.txt`; `link(2)` fails with `EEXIST` instead of replacing,
/// so the link itself is the race arbiter and readers only ever see a fully
/// written, synced file.
#[derive(Clone, Debug)]
pub struct FsFeedbackNamespace {
    public: PathBuf,
    staging: PathBuf,
}

impl FsFeedbackNamespace {
    pub fn new(
        public: impl Into<PathBuf>,
        staging: impl Into<PathBuf>,
    ) -> Self {
        Self {
            public: public.into(),
            staging: staging.into(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.public, &self.staging] {
            tokio::fs::create_dir_all(dir).await.map_err(|err| {
                KeeperError::StageWriteFailed(format!(
                    "failed to create feedback dir {:?}: {err}",
                    dir
                ))
            })?;
        }
        Ok(())
    }

    pub fn public_path(&self, key: &FeedbackKey) -> PathBuf {
        self.public.join(key.file_name())
    }

    fn staged_path(&self, staged: &StagedFeedback) -> PathBuf {
        self.staging
            .join(format!("{}.{STAGED_SUFFIX}", staged.staging_id.simple()))
    }

    async fn write_staged(path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(content).await?;
        file.flush().await?;
        // Content must be durable before it can be linked into view.
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackNamespace for FsFeedbackNamespace {
    async fn stage(
        &self,
        key: &FeedbackKey,
        content: &[u8],
    ) -> Result<StagedFeedback> {
        let staged = StagedFeedback::new(key.clone());
        let path = self.staged_path(&staged);

        if let Err(err) = Self::write_staged(&path, content).await {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(KeeperError::StageWriteFailed(format!(
                "failed to stage feedback {:?}: {err}",
                path
            )));
        }

        Ok(staged)
    }

    async fn exists(&self, key: &FeedbackKey) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.public_path(key)).await?)
    }

    async fn publish(&self, staged: &StagedFeedback) -> Result<()> {
        let from = self.staged_path(staged);
        let to = self.public_path(&staged.key);

        match tokio::fs::hard_link(&from, &to).await {
            Ok(()) => {}
            Err(err) if err.kind() == IoErrorKind::AlreadyExists => {
                return Err(KeeperError::DuplicateIdentity(
                    staged.key.to_string(),
                ));
            }
            Err(err) => return Err(KeeperError::Io(err)),
        }

        // Best-effort: persist the new directory entry.
        if let Ok(dir) = tokio::fs::File::open(&self.public).await {
            let _ = dir.sync_all().await;
        }
        if let Err(err) = tokio::fs::remove_file(&from).await {
            debug!(
                path = ?from,
                error = %err,
                "staged name not removed after publish"
            );
        }
        Ok(())
    }

    async fn discard(&self, staged: &StagedFeedback) -> Result<()> {
        match tokio::fs::remove_file(self.staged_path(staged)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeeperError::Io(err)),
        }
    }

    async fn sweep_stale(&self, max_age: Duration) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(&self.staging).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(KeeperError::Io(err)),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let extension = path.extension().and_then(|ext| ext.to_str());
            if extension != Some(STAGED_SUFFIX) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            };
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| modified.elapsed().ok())
                .unwrap_or_default();
            if age < max_age {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(err) if err.kind() == IoErrorKind::NotFound => {}
                Err(err) => return Err(KeeperError::Io(err)),
            }
        }

        Ok(removed)
    }
}
