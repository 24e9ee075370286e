use std::{fs, sync::LazyLock, time::Duration};

use keeper_config::{ConfigLoadError, ConfigLoader};
use tempfile::tempdir;
use tokio::sync::Mutex;

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

const MANAGED_VARS: &[&str] = &[
    "KEEPER_CONFIG",
    "SERVER_HOST",
    "FAVORITES_PORT",
    "FEEDBACK_PORT",
    "DATABASE_URL",
    "DATABASE_MAX_CONNECTIONS",
    "CATALOG_BASE_URL",
    "CATALOG_TIMEOUT_SECS",
    "FEEDBACK_ROOT",
    "FEEDBACK_PUBLIC_DIR",
    "FEEDBACK_STAGING_DIR",
    "FEEDBACK_PAGES_DIR",
    "FEEDBACK_STATIC_DIR",
    "STAGING_MAX_AGE_SECS",
    "STAGING_SWEEP_INTERVAL_SECS",
];

fn clear_env() {
    for key in MANAGED_VARS {
        unsafe { std::env::remove_var(key) };
    }
}

fn loader_without_dotenv(dir: &tempfile::TempDir) -> ConfigLoader {
    ConfigLoader::new().with_env_file(dir.path().join("absent.env"))
}

#[tokio::test]
async fn defaults_apply_without_file_or_env() {
    let _guard = ENV_LOCK.lock().await;
    clear_env();
    let dir = tempdir().expect("tempdir");

    let load = loader_without_dotenv(&dir).load().expect("load");
    let config = load.config;

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.favorites_port, 3000);
    assert_eq!(config.server.feedback_port, 8080);
    assert_eq!(config.catalog.base_url, "https://swapi.dev/api");
    assert_eq!(config.catalog.timeout, Duration::from_secs(10));
    assert!(config.database.url.is_none());
    assert!(config.feedback.public_path().ends_with("feedback"));
    assert!(config.feedback.staging_path().ends_with("temp"));
    assert!(!config.metadata.env_file_loaded);

    let messages: Vec<_> =
        load.warnings.iter().map(|w| w.message.clone()).collect();
    assert!(messages.iter().any(|m| m.contains("No keeper.toml")));
    assert!(messages.iter().any(|m| m.contains("DATABASE_URL")));
}

#[tokio::test]
async fn environment_overrides_file_values() {
    let _guard = ENV_LOCK.lock().await;
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("keeper.toml");
    fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
favorites_port = 4000

[database]
url = "postgres://keeper@localhost/favorites"

[feedback]
root = "/srv/keeper"
staging_max_age_secs = 120
"#,
    )
    .unwrap();

    unsafe { std::env::set_var("FAVORITES_PORT", "4100") };
    let load = loader_without_dotenv(&dir)
        .with_config_path(&path)
        .load()
        .expect("load");
    clear_env();

    let config = load.config;
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.favorites_port, 4100);
    assert_eq!(
        config.database.url.as_deref(),
        Some("postgres://keeper@localhost/favorites")
    );
    assert_eq!(
        config.feedback.public_path(),
        std::path::PathBuf::from("/srv/keeper/feedback")
    );
    assert_eq!(config.feedback.staging_max_age, Duration::from_secs(120));
    assert_eq!(config.metadata.config_path.as_deref(), Some(path.as_path()));
    assert!(
        load.warnings.is_empty(),
        "unexpected warnings: {:?}",
        load.warnings
    );
}

#[tokio::test]
async fn explicit_missing_config_is_an_error() {
    let _guard = ENV_LOCK.lock().await;
    clear_env();
    let dir = tempdir().expect("tempdir");

    let err = loader_without_dotenv(&dir)
        .with_config_path(dir.path().join("missing.toml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[tokio::test]
async fn malformed_toml_is_reported_with_path() {
    let _guard = ENV_LOCK.lock().await;
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("keeper.toml");
    fs::write(&path, "[server\nhost = 1").unwrap();

    let err = loader_without_dotenv(&dir)
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[tokio::test]
async fn non_postgres_database_url_is_rejected() {
    let _guard = ENV_LOCK.lock().await;
    clear_env();
    let dir = tempdir().expect("tempdir");

    unsafe {
        std::env::set_var("DATABASE_URL", "mongodb://mongo:27017/favorites")
    };
    let err = loader_without_dotenv(&dir).load().unwrap_err();
    clear_env();

    assert!(matches!(err, ConfigLoadError::UnsupportedDatabaseScheme));
}

#[tokio::test]
async fn split_feedback_directories_raise_a_warning() {
    let _guard = ENV_LOCK.lock().await;
    clear_env();
    let dir = tempdir().expect("tempdir");

    unsafe {
        std::env::set_var("DATABASE_URL", "postgres://keeper@localhost/fav");
        std::env::set_var("FEEDBACK_STAGING_DIR", "/var/tmp/keeper-staging");
    }
    let load = loader_without_dotenv(&dir).load().expect("load");
    clear_env();

    assert!(
        load.warnings
            .iter()
            .any(|w| w.message.contains("do not share a parent"))
    );
}
