//! In-memory implementations of the storage ports.
//!
//! They keep the same arbitration contract as the real adapters: `insert`
//! and `publish` check and commit under one lock, so a stale `find_by_name`
//! or `exists` never lets two writers win.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::favorites::{FavoriteRecord, NewFavorite};
use crate::domain::feedback::FeedbackKey;
use crate::error::{KeeperError, Result};
use crate::ports::{FavoriteStore, FeedbackNamespace, StagedFeedback};

#[derive(Debug, Default)]
pub struct InMemoryFavoriteStore {
    records: Mutex<Vec<FavoriteRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryFavoriteStore {
    /// Make every call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KeeperError::StoreUnavailable(
                "in-memory store switched off".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn list_all(&self) -> Result<Vec<FavoriteRecord>> {
        self.check_available()?;
        Ok(self.records.lock().await.clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<FavoriteRecord>> {
        self.check_available()?;
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.name == name).cloned())
    }

    async fn insert(&self, favorite: NewFavorite) -> Result<FavoriteRecord> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KeeperError::StoreWriteFailed(
                "in-memory store switched off".into(),
            ));
        }

        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.name == favorite.name) {
            return Err(KeeperError::DuplicateIdentity(favorite.name));
        }

        let record = favorite.into_record(Uuid::new_v4(), Utc::now());
        records.push(record.clone());
        Ok(record)
    }
}

#[derive(Debug)]
struct StagedEntry {
    content: Vec<u8>,
    staged_at: Instant,
}

#[derive(Debug, Default)]
pub struct InMemoryFeedbackNamespace {
    staged: Mutex<HashMap<Uuid, StagedEntry>>,
    published: Mutex<HashMap<FeedbackKey, Vec<u8>>>,
    fail_staging: AtomicBool,
}

impl InMemoryFeedbackNamespace {
    pub fn fail_staging(&self, fail: bool) {
        self.fail_staging.store(fail, Ordering::SeqCst);
    }

    pub async fn content(&self, key: &FeedbackKey) -> Option<String> {
        self.published
            .lock()
            .await
            .get(key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub async fn staged_count(&self) -> usize {
        self.staged.lock().await.len()
    }
}

#[async_trait]
impl FeedbackNamespace for InMemoryFeedbackNamespace {
    async fn stage(
        &self,
        key: &FeedbackKey,
        content: &[u8],
    ) -> Result<StagedFeedback> {
        if self.fail_staging.load(Ordering::SeqCst) {
            return Err(KeeperError::StageWriteFailed(
                "in-memory staging switched off".into(),
            ));
        }

        let staged = StagedFeedback::new(key.clone());
        self.staged.lock().await.insert(
            staged.staging_id,
            StagedEntry {
                content: content.to_vec(),
                staged_at: Instant::now(),
            },
        );
        Ok(staged)
    }

    async fn exists(&self, key: &FeedbackKey) -> Result<bool> {
        Ok(self.published.lock().await.contains_key(key))
    }

    async fn publish(&self, staged: &StagedFeedback) -> Result<()> {
        let mut published = self.published.lock().await;
        if published.contains_key(&staged.key) {
            return Err(KeeperError::DuplicateIdentity(staged.key.to_string()));
        }

        let entry = self
            .staged
            .lock()
            .await
            .remove(&staged.staging_id)
            .ok_or_else(|| {
                KeeperError::StageWriteFailed(format!(
                    "staged object {} is gone",
                    staged.staging_id
                ))
            })?;
        published.insert(staged.key.clone(), entry.content);
        Ok(())
    }

    async fn discard(&self, staged: &StagedFeedback) -> Result<()> {
        self.staged.lock().await.remove(&staged.staging_id);
        Ok(())
    }

    async fn sweep_stale(&self, max_age: Duration) -> Result<usize> {
        let mut staged = self.staged.lock().await;
        let before = staged.len();
        staged.retain(|_, entry| entry.staged_at.elapsed() < max_age);
        Ok(before - staged.len())
    }
}
