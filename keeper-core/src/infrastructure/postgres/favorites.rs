use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::is_unique_violation;
use crate::domain::favorites::{FavoriteKind, FavoriteRecord, NewFavorite};
use crate::error::{KeeperError, Result};
use crate::ports::FavoriteStore;

#[derive(Debug, Clone)]
pub struct PostgresFavoriteStore {
    pool: PgPool,
}

impl PostgresFavoriteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<FavoriteRecord> {
        let read_err = |column: &str, e: sqlx::Error| {
            KeeperError::StoreUnavailable(format!(
                "Failed to read favorite {column}: {e}"
            ))
        };

        let kind: String =
            row.try_get("kind").map_err(|e| read_err("kind", e))?;
        let kind = kind.parse::<FavoriteKind>().map_err(|_| {
            KeeperError::StoreUnavailable(format!(
                "favorite row carries unknown kind {kind:?}"
            ))
        })?;

        Ok(FavoriteRecord {
            id: row.try_get("id").map_err(|e| read_err("id", e))?,
            name: row.try_get("name").map_err(|e| read_err("name", e))?,
            kind,
            url: row.try_get("url").map_err(|e| read_err("url", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| read_err("created_at", e))?,
        })
    }
}

#[async_trait]
impl FavoriteStore for PostgresFavoriteStore {
    async fn list_all(&self) -> Result<Vec<FavoriteRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, kind, url, created_at
            FROM favorites
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            KeeperError::StoreUnavailable(format!(
                "Failed to list favorites: {e}"
            ))
        })?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<FavoriteRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, kind, url, created_at
            FROM favorites
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            KeeperError::StoreUnavailable(format!(
                "Failed to look up favorite: {e}"
            ))
        })?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn insert(&self, favorite: NewFavorite) -> Result<FavoriteRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (id, name, kind, url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, kind, url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&favorite.name)
        .bind(favorite.kind.as_str())
        .bind(&favorite.url)
        .fetch_one(self.pool())
        .await;

        match result {
            Ok(row) => Self::map_row(&row),
            Err(err) if is_unique_violation(&err) => {
                Err(KeeperError::DuplicateIdentity(favorite.name))
            }
            Err(err) => Err(KeeperError::StoreWriteFailed(format!(
                "Failed to insert favorite: {err}"
            ))),
        }
    }
}
