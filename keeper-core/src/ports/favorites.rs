use async_trait::async_trait;

use crate::domain::favorites::{FavoriteRecord, NewFavorite};
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All records in store order.
    async fn list_all(&self) -> Result<Vec<FavoriteRecord>>;

    /// Exact-match lookup on the identity key.
    async fn find_by_name(&self, name: &str) -> Result<Option<FavoriteRecord>>;

    /// Insert a new record. Fails with `DuplicateIdentity` when a record with
    /// the same name exists, including one committed after the caller's last
    /// `find_by_name`.
    async fn insert(&self, favorite: NewFavorite) -> Result<FavoriteRecord>;
}
