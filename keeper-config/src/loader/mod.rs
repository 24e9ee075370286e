pub mod error;

use std::{fs, path::PathBuf, sync::LazyLock, time::Duration};

use url::Url;

use crate::{
    constants::*,
    models::{
        CatalogConfig, Config, ConfigMetadata, DatabaseConfig, FeedbackConfig,
        ServerConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::ConfigWarnings,
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: LazyLock<Vec<PathBuf>> = LazyLock::new(|| {
    vec![PathBuf::from("keeper.toml"), PathBuf::from("config/keeper.toml")]
});

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default, Clone)]
struct ConfigLoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| ()),
            None => dotenvy::dotenv().map(|_| ()),
        };
        let env_file_loaded = match loaded {
            Ok(()) => true,
            Err(dotenvy::Error::Io(_)) => false,
            Err(err) => return Err(err.into()),
        };

        let env = EnvConfig::gather();
        let (file_config, config_path) = self.load_file_config(&env)?;

        self.compose_config(file_config, env, config_path, env_file_loaded)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => path.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No keeper.toml detected; using environment and defaults",
                "Create keeper.toml or set KEEPER_CONFIG to point at one",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            catalog: file_catalog,
            feedback: file_feedback,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            favorites_port: env
                .favorites_port
                .or(file_server.favorites_port)
                .unwrap_or(DEFAULT_FAVORITES_PORT),
            feedback_port: env
                .feedback_port
                .or(file_server.feedback_port)
                .unwrap_or(DEFAULT_FEEDBACK_PORT),
        };

        let database_url = env.database_url.or(file_database.url);
        match &database_url {
            Some(url) => validate_database_url(url)?,
            None => warnings.push_with_hint(
                "DATABASE_URL is not set; the favorites service cannot start",
                "Set DATABASE_URL or [database].url in keeper.toml",
            ),
        }
        let database = DatabaseConfig {
            url: database_url,
            max_connections: env
                .database_max_connections
                .or(file_database.max_connections)
                .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS)
                .max(1),
        };

        let base_url = env
            .catalog_base_url
            .or(file_catalog.base_url)
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|source| {
            ConfigLoadError::InvalidCatalogUrl {
                url: base_url.clone(),
                source,
            }
        })?;
        let catalog = CatalogConfig {
            base_url,
            timeout: Duration::from_secs(
                env.catalog_timeout_secs
                    .or(file_catalog.timeout_secs)
                    .unwrap_or(DEFAULT_CATALOG_TIMEOUT_SECS),
            ),
        };

        let feedback = FeedbackConfig {
            root: env
                .feedback_root
                .or(file_feedback.root)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEEDBACK_ROOT)),
            public_dir: env
                .feedback_public_dir
                .or(file_feedback.public_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEEDBACK_PUBLIC_DIR)),
            staging_dir: env
                .feedback_staging_dir
                .or(file_feedback.staging_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEEDBACK_STAGING_DIR)),
            pages_dir: env
                .feedback_pages_dir
                .or(file_feedback.pages_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEEDBACK_PAGES_DIR)),
            static_dir: env
                .feedback_static_dir
                .or(file_feedback.static_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEEDBACK_STATIC_DIR)),
            staging_max_age: Duration::from_secs(
                env.staging_max_age_secs
                    .or(file_feedback.staging_max_age_secs)
                    .unwrap_or(DEFAULT_STAGING_MAX_AGE_SECS),
            ),
            sweep_interval: Duration::from_secs(
                env.staging_sweep_interval_secs
                    .or(file_feedback.sweep_interval_secs)
                    .unwrap_or(DEFAULT_STAGING_SWEEP_INTERVAL_SECS)
                    .max(1),
            ),
        };

        if !feedback.shares_parent() {
            warnings.push_with_hint(
                "Feedback staging and public directories do not share a parent",
                "Staged files are hard-linked into place; keep both \
                 directories on one filesystem",
            );
        }

        let config = Config {
            server,
            database,
            catalog,
            feedback,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        Ok(ConfigLoad { config, warnings })
    }
}

fn validate_database_url(raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw)
        .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        _ => Err(ConfigLoadError::UnsupportedDatabaseScheme),
    }
}
