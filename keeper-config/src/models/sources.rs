use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    #[serde(default)]
    pub feedback: FileFeedbackConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileFeedbackConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_max_age_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep_interval_secs: Option<u64>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub favorites_port: Option<u16>,
    pub feedback_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub catalog_base_url: Option<String>,
    pub catalog_timeout_secs: Option<u64>,
    pub feedback_root: Option<PathBuf>,
    pub feedback_public_dir: Option<PathBuf>,
    pub feedback_staging_dir: Option<PathBuf>,
    pub feedback_pages_dir: Option<PathBuf>,
    pub feedback_static_dir: Option<PathBuf>,
    pub staging_max_age_secs: Option<u64>,
    pub staging_sweep_interval_secs: Option<u64>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: path_var("KEEPER_CONFIG"),
            server_host: string_var("SERVER_HOST"),
            favorites_port: parse_var("FAVORITES_PORT"),
            feedback_port: parse_var("FEEDBACK_PORT"),
            database_url: string_var("DATABASE_URL"),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS"),
            catalog_base_url: string_var("CATALOG_BASE_URL"),
            catalog_timeout_secs: parse_var("CATALOG_TIMEOUT_SECS"),
            feedback_root: path_var("FEEDBACK_ROOT"),
            feedback_public_dir: path_var("FEEDBACK_PUBLIC_DIR"),
            feedback_staging_dir: path_var("FEEDBACK_STAGING_DIR"),
            feedback_pages_dir: path_var("FEEDBACK_PAGES_DIR"),
            feedback_static_dir: path_var("FEEDBACK_STATIC_DIR"),
            staging_max_age_secs: parse_var("STAGING_MAX_AGE_SECS"),
            staging_sweep_interval_secs: parse_var(
                "STAGING_SWEEP_INTERVAL_SECS",
            ),
        }
    }
}

fn string_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn path_var(name: &str) -> Option<PathBuf> {
    string_var(name).map(PathBuf::from)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = string_var(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                var = name,
                value = %raw,
                "ignoring unparsable environment value"
            );
            None
        }
    }
}
