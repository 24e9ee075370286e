//! Requires a live PostgreSQL (`DATABASE_URL`); run with `--features e2e`.
#![cfg(feature = "e2e")]

use std::sync::Arc;

use anyhow::Result;
use keeper_core::{
    IdentityRegistry,
    infrastructure::PostgresFavoriteStore,
    ports::FavoriteStore,
};
use sqlx::PgPool;

#[sqlx::test(migrator = "keeper_core::MIGRATOR")]
async fn unique_index_rejects_second_insert(pool: PgPool) -> Result<()> {
    let store = PostgresFavoriteStore::new(pool);
    let registry = IdentityRegistry::new(Arc::new(store.clone()));

    let created = registry.create("Luke", "character", "x").await?;
    assert_eq!(created.name, "Luke");

    let err = registry.create("Luke", "movie", "y").await.unwrap_err();
    assert!(err.is_duplicate());

    let all = store.list_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].url, "x");
    Ok(())
}

#[sqlx::test(migrator = "keeper_core::MIGRATOR")]
async fn racing_inserts_have_one_winner(pool: PgPool) -> Result<()> {
    let store = Arc::new(PostgresFavoriteStore::new(pool));

    let attempts = (0..8).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let favorite = keeper_core::NewFavorite::parse(
                "Han",
                "character",
                &format!("url-{i}"),
            )?;
            store.insert(favorite).await
        })
    });

    let mut created = 0;
    for result in futures::future::join_all(attempts).await {
        match result? {
            Ok(_) => created += 1,
            Err(err) => assert!(err.is_duplicate(), "unexpected {err}"),
        }
    }
    assert_eq!(created, 1);
    Ok(())
}
