use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use crate::domain::favorites::{FavoriteRecord, NewFavorite};
use crate::error::{KeeperError, Result};
use crate::ports::FavoriteStore;

/// Name-unique registry of favorites.
#[derive(Clone)]
pub struct IdentityRegistry {
    store: Arc<dyn FavoriteStore>,
}

impl fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityRegistry").finish_non_exhaustive()
    }
}

impl IdentityRegistry {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<FavoriteRecord>> {
        self.store.list_all().await
    }

    /// Validate, probe, then insert. The probe only short-circuits the common
    /// duplicate case; the store's unique insert decides concurrent races.
    pub async fn create(
        &self,
        name: &str,
        kind: &str,
        url: &str,
    ) -> Result<FavoriteRecord> {
        let favorite = NewFavorite::parse(name, kind, url)?;

        if self.store.find_by_name(&favorite.name).await?.is_some() {
            info!(name = %favorite.name, "favorite already registered");
            return Err(KeeperError::DuplicateIdentity(favorite.name));
        }

        match self.store.insert(favorite).await {
            Ok(record) => {
                debug!(
                    name = %record.name,
                    id = %record.id,
                    "favorite created"
                );
                Ok(record)
            }
            Err(KeeperError::DuplicateIdentity(name)) => {
                info!(name = %name, "favorite inserted concurrently");
                Err(KeeperError::DuplicateIdentity(name))
            }
            Err(err) => {
                warn!(error = %err, "favorite insert failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::error::ErrorKind;
    use crate::ports::favorites::MockFavoriteStore;
    use crate::testing::InMemoryFavoriteStore;

    fn registry() -> (IdentityRegistry, Arc<InMemoryFavoriteStore>) {
        let store = Arc::new(InMemoryFavoriteStore::default());
        (IdentityRegistry::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_then_list_includes_record() {
        let (registry, _) = registry();

        let created = registry.create("Luke", "character", "x").await.unwrap();
        assert_eq!(created.name, "Luke");

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Luke");
    }

    #[tokio::test]
    async fn invalid_kind_has_no_side_effect() {
        let (registry, store) = registry();

        let err = registry.create("Luke", "alien", "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_create_keeps_first_payload() {
        let (registry, _) = registry();

        registry.create("Luke", "character", "first").await.unwrap();
        let err = registry
            .create("Luke", "movie", "second")
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].url, "first");
    }

    #[tokio::test]
    async fn unique_insert_decides_when_probe_misses() {
        let mut store = MockFavoriteStore::new();
        store.expect_find_by_name().returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|fav| Err(KeeperError::DuplicateIdentity(fav.name)));

        let registry = IdentityRegistry::new(Arc::new(store));
        let err = registry.create("Luke", "character", "x").await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn probe_hit_skips_insert() {
        let mut store = MockFavoriteStore::new();
        store.expect_find_by_name().returning(|name| {
            Ok(Some(
                NewFavorite::parse(name, "movie", "x")
                    .unwrap()
                    .into_record(Uuid::new_v4(), Utc::now()),
            ))
        });
        store.expect_insert().never();

        let registry = IdentityRegistry::new(Arc::new(store));
        let err = registry.create("Luke", "movie", "x").await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn write_failures_pass_through() {
        let mut store = MockFavoriteStore::new();
        store.expect_find_by_name().returning(|_| Ok(None));
        store.expect_insert().returning(|_| {
            Err(KeeperError::StoreWriteFailed("connection reset".into()))
        });

        let registry = IdentityRegistry::new(Arc::new(store));
        let err = registry.create("Luke", "movie", "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreWriteFailed);
    }

    #[tokio::test]
    async fn concurrent_creates_have_one_winner() {
        let (registry, store) = registry();

        let attempts = (0..16).map(|i| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry.create("Leia", "character", &format!("url-{i}")).await
            })
        });
        let results = futures::future::join_all(attempts).await;

        let mut created = 0;
        for result in results {
            match result.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(err.is_duplicate(), "unexpected {err}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
