pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_FAVORITES_PORT: u16 = 3000;
pub const DEFAULT_FEEDBACK_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://swapi.dev/api";
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_FEEDBACK_ROOT: &str = ".";
pub const DEFAULT_FEEDBACK_PUBLIC_DIR: &str = "feedback";
pub const DEFAULT_FEEDBACK_STAGING_DIR: &str = "temp";
pub const DEFAULT_FEEDBACK_PAGES_DIR: &str = "pages";
pub const DEFAULT_FEEDBACK_STATIC_DIR: &str = "public";
pub const DEFAULT_STAGING_MAX_AGE_SECS: u64 = 60 * 60;
pub const DEFAULT_STAGING_SWEEP_INTERVAL_SECS: u64 = 10 * 60;
