use std::sync::Arc;

use anyhow::Context;
use keeper_config::Config;
use keeper_core::{
    HttpCatalogClient, IdentityRegistry, StagedFileStore,
    infrastructure::{FsFeedbackNamespace, PostgresFavoriteStore, postgres},
};
use sqlx::PgPool;
use tracing::info;

use super::app_state::{FavoritesState, FeedbackState};

/// Opens the pool for the favorites store. Fails fast when no URL is set.
pub async fn connect_database(config: &Config) -> anyhow::Result<PgPool> {
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL must be set for the favorites service")?;

    let pool = postgres::connect(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!(
        max_connections = config.database.max_connections,
        "connected to PostgreSQL"
    );
    Ok(pool)
}

/// Connects, applies pending migrations, and wires the registry and catalog.
pub async fn build_favorites_state(
    config: &Config,
) -> anyhow::Result<FavoritesState> {
    let pool = connect_database(config).await?;
    postgres::migrate(&pool)
        .await
        .context("failed to apply database migrations")?;

    let registry =
        IdentityRegistry::new(Arc::new(PostgresFavoriteStore::new(pool)));
    let catalog =
        HttpCatalogClient::new(&config.catalog.base_url, config.catalog.timeout)
            .context("failed to build catalog client")?;
    info!(base_url = %config.catalog.base_url, "catalog client ready");

    Ok(FavoritesState::new(registry, Arc::new(catalog)))
}

pub fn feedback_namespace(config: &Config) -> FsFeedbackNamespace {
    FsFeedbackNamespace::new(
        config.feedback.public_path(),
        config.feedback.staging_path(),
    )
}

/// Creates the feedback directories and wires the staged store.
pub async fn build_feedback_state(
    config: &Config,
) -> anyhow::Result<FeedbackState> {
    let namespace = feedback_namespace(config);
    namespace
        .ensure_dirs()
        .await
        .context("failed to prepare feedback directories")?;
    info!(
        public = %namespace.public_dir().display(),
        staging = %namespace.staging_dir().display(),
        "feedback namespace ready"
    );

    Ok(FeedbackState::new(StagedFileStore::new(Arc::new(namespace))))
}
