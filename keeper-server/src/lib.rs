//! # Keeper Server
//!
//! Two independent HTTP services over `keeper-core`:
//!
//! - **favorites**: `GET`/`POST /favorites` on the name-unique registry, plus
//!   the `/movies` and `/people` catalog pass-through.
//! - **feedback**: `POST /create` commits a titled text once; the HTML pages
//!   and committed files are served statically.
//!
//! Every failure is caught at the handler boundary and mapped to a response.

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use errors::{AppError, AppResult};
pub use infra::app_state::{FavoritesState, FeedbackState};
