//! Configuration library for Keeper.
//!
//! Values are layered defaults < `keeper.toml` < environment (including a
//! `.env` file). The server applies CLI overrides on top of the loaded
//! [`Config`].

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    CatalogConfig, Config, ConfigMetadata, DatabaseConfig, FeedbackConfig,
    ServerConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
