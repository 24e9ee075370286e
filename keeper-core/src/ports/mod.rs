//! Storage ports the services are written against.
//!
//! Each port exposes a uniqueness-enforcing terminal operation
//! ([`FavoriteStore::insert`], [`FeedbackNamespace::publish`]). Implementations
//! must make that operation the race arbiter: it has to fail with
//! [`KeeperError::DuplicateIdentity`](crate::KeeperError::DuplicateIdentity)
//! when the identity key already exists, no matter what an earlier probe
//! reported.

pub mod favorites;
pub mod feedback;

pub use favorites::FavoriteStore;
pub use feedback::{FeedbackNamespace, StagedFeedback};
