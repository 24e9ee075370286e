pub mod sources;

use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub feedback: FeedbackConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub favorites_port: u16,
    pub feedback_port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Layout of the feedback service on disk. Relative directories resolve
/// against `root`.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub root: PathBuf,
    pub public_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub pages_dir: PathBuf,
    pub static_dir: PathBuf,
    pub staging_max_age: Duration,
    pub sweep_interval: Duration,
}

impl FeedbackConfig {
    pub fn public_path(&self) -> PathBuf {
        self.root.join(&self.public_dir)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.root.join(&self.staging_dir)
    }

    pub fn pages_path(&self) -> PathBuf {
        self.root.join(&self.pages_dir)
    }

    pub fn static_path(&self) -> PathBuf {
        self.root.join(&self.static_dir)
    }

    /// Publishing hard-links staged files into the public directory, which
    /// only works within one filesystem. Sharing a parent is the cheap proxy.
    pub fn shares_parent(&self) -> bool {
        let public = self.public_path();
        let staging = self.staging_path();
        public.parent() == staging.parent()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
