//! # Keeper Core
//!
//! Core library for the Keeper services: the favorites registry and the
//! feedback intake store.
//!
//! ## Overview
//!
//! Both services answer the same question, "does a resource with this identity
//! already exist?", and bring the resource into existence only if it does not.
//! The existence probe each service runs first is a fast path. The terminal
//! write is what arbitrates races:
//!
//! - **Favorites**: a `UNIQUE` index on `name`; a violation surfaces as
//!   [`KeeperError::DuplicateIdentity`].
//! - **Feedback**: content is staged privately, then published with a
//!   link-without-overwrite; an existing target surfaces as
//!   [`KeeperError::DuplicateIdentity`].
//!
//! ## Architecture
//!
//! - [`domain`]: records and identity keys
//! - [`ports`]: storage interfaces the services are written against
//! - [`services`]: [`IdentityRegistry`] and [`StagedFileStore`]
//! - [`infrastructure`]: PostgreSQL and filesystem adapters
//! - [`catalog`]: read-only pass-through to the upstream catalog API

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;
pub mod services;

/// In-memory port implementations for tests
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use catalog::{CatalogClient, CatalogResource, HttpCatalogClient};
pub use domain::favorites::{FavoriteKind, FavoriteRecord, NewFavorite};
pub use domain::feedback::{FeedbackKey, FeedbackRecord};
pub use error::{ErrorKind, KeeperError, Result};
pub use services::{IdentityRegistry, StagedFileStore};
