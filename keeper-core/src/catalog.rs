//! Read-only pass-through to the upstream catalog API.
//!
//! Payloads are relayed verbatim as JSON; nothing here is cached or stored.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{KeeperError, Result};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://swapi.dev/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResource {
    Films,
    People,
}

impl CatalogResource {
    pub fn path(&self) -> &'static str {
        match self {
            CatalogResource::Films => "films",
            CatalogResource::People => "people",
        }
    }
}

impl fmt::Display for CatalogResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch(&self, resource: CatalogResource) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|e| {
            KeeperError::InvalidArgument(format!(
                "invalid catalog base URL {base_url:?}: {e}"
            ))
        })?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                KeeperError::UpstreamUnavailable(format!(
                    "failed to build HTTP client: {e}"
                ))
            })?;

        Ok(Self { client, base })
    }

    pub fn resource_url(&self, resource: CatalogResource) -> Result<Url> {
        self.base.join(resource.path()).map_err(|e| {
            KeeperError::UpstreamUnavailable(format!(
                "cannot build catalog URL for {resource}: {e}"
            ))
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch(&self, resource: CatalogResource) -> Result<Value> {
        let url = self.resource_url(resource)?;
        debug!(%url, "fetching catalog resource");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!(%url, error = %e, "catalog request failed");
                KeeperError::UpstreamUnavailable(format!("{resource}: {e}"))
            })?;

        response.json::<Value>().await.map_err(|e| {
            warn!(%url, error = %e, "catalog returned an unreadable payload");
            KeeperError::UpstreamUnavailable(format!("{resource}: {e}"))
        })
    }
}
