//! Adapters that implement the storage ports.

pub mod fs;
#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod postgres;

pub use fs::FsFeedbackNamespace;
#[cfg(feature = "database")]
pub use postgres::PostgresFavoriteStore;
