#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use keeper_core::{
    CatalogClient, CatalogResource, IdentityRegistry, KeeperError,
    StagedFileStore,
    infrastructure::FsFeedbackNamespace,
    ports::FeedbackNamespace,
    testing::InMemoryFavoriteStore,
};
use keeper_server::{FavoritesState, FeedbackState, routes};

pub const FEEDBACK_PAGE: &str = "<h1>Leave feedback</h1>";
pub const EXISTS_PAGE: &str = "<h1>That title is taken</h1>";
pub const STYLESHEET: &str = "body { color: #333; }";

/// Catalog double returning canned payloads; `None` simulates an outage.
#[derive(Debug, Default, Clone)]
pub struct StubCatalog {
    pub films: Option<Value>,
    pub people: Option<Value>,
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn fetch(
        &self,
        resource: CatalogResource,
    ) -> keeper_core::Result<Value> {
        let payload = match resource {
            CatalogResource::Films => self.films.clone(),
            CatalogResource::People => self.people.clone(),
        };
        payload.ok_or_else(|| {
            KeeperError::UpstreamUnavailable(format!("{resource} unreachable"))
        })
    }
}

fn into_server(router: Router) -> Result<TestServer> {
    TestServer::new(router).map_err(|err| anyhow::anyhow!(err.to_string()))
}

pub struct FavoritesApp {
    pub server: TestServer,
    pub store: Arc<InMemoryFavoriteStore>,
}

pub fn build_favorites_app(catalog: StubCatalog) -> Result<FavoritesApp> {
    let store = Arc::new(InMemoryFavoriteStore::default());
    let state = FavoritesState::new(
        IdentityRegistry::new(store.clone()),
        Arc::new(catalog),
    );
    let server = into_server(routes::create_favorites_router(state))?;
    Ok(FavoritesApp { server, store })
}

pub struct FeedbackApp {
    pub server: TestServer,
    pub public_dir: PathBuf,
    pub staging_dir: PathBuf,
    _root: TempDir,
}

impl FeedbackApp {
    pub fn published(&self, file_name: &str) -> Option<String> {
        std::fs::read_to_string(self.public_dir.join(file_name)).ok()
    }

    pub fn staging_entries(&self) -> usize {
        std::fs::read_dir(&self.staging_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn write_site(root: &TempDir) -> Result<(PathBuf, PathBuf)> {
    let pages = root.path().join("pages");
    let public = root.path().join("public");
    std::fs::create_dir_all(&pages)?;
    std::fs::create_dir_all(public.join("styles"))?;
    std::fs::write(pages.join("feedback.html"), FEEDBACK_PAGE)?;
    std::fs::write(pages.join("exists.html"), EXISTS_PAGE)?;
    std::fs::write(public.join("styles").join("styles.css"), STYLESHEET)?;
    Ok((pages, public))
}

/// Feedback router over a real filesystem namespace in a temp dir.
pub async fn build_feedback_app() -> Result<FeedbackApp> {
    let root = tempfile::tempdir()?;
    let (pages, static_dir) = write_site(&root)?;
    let public_dir = root.path().join("feedback");
    let staging_dir = root.path().join("temp");

    let namespace = FsFeedbackNamespace::new(&public_dir, &staging_dir);
    namespace.ensure_dirs().await?;
    let state = FeedbackState::new(StagedFileStore::new(Arc::new(namespace)));

    let router = routes::create_feedback_router(
        state,
        &pages,
        &public_dir,
        &static_dir,
    );

    Ok(FeedbackApp {
        server: into_server(router)?,
        public_dir,
        staging_dir,
        _root: root,
    })
}

/// Feedback router over an arbitrary namespace, for failure injection.
pub fn build_feedback_app_with(
    namespace: Arc<dyn FeedbackNamespace>,
) -> Result<(TestServer, TempDir)> {
    let root = tempfile::tempdir()?;
    let (pages, static_dir) = write_site(&root)?;
    let state = FeedbackState::new(StagedFileStore::new(namespace));
    let router = routes::create_feedback_router(
        state,
        &pages,
        &root.path().join("feedback"),
        &static_dir,
    );
    Ok((into_server(router)?, root))
}
