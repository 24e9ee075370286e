//! The two conditional-create services.

pub mod identity_registry;
pub mod staged_file_store;

pub use identity_registry::IdentityRegistry;
pub use staged_file_store::StagedFileStore;
