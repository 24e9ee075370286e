use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use keeper_core::KeeperError;

use crate::infra::app_state::FeedbackState;

pub const FEEDBACK_FAILURE_MESSAGE: &str = "An error occurred.";
pub const CREATED_LOCATION: &str = "/";
pub const EXISTS_LOCATION: &str = "/exists";

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// `302 Found` with a `Location` header.
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// `POST /create`: commit `text` under the normalized `title`.
///
/// The browser is sent back to the form on success and to the exists page
/// when the title is taken; only storage failures produce a 500.
pub async fn create_feedback_handler(
    State(state): State<FeedbackState>,
    Form(form): Form<FeedbackForm>,
) -> Response {
    let content = form.text.as_deref().unwrap_or_default();

    match state.store.commit(form.title.as_deref(), content).await {
        Ok(record) => {
            info!(
                key = %record.key,
                bytes = record.content.len(),
                "feedback committed"
            );
            found(CREATED_LOCATION)
        }
        Err(KeeperError::DuplicateIdentity(key)) => {
            info!(key = %key, "feedback title already taken");
            found(EXISTS_LOCATION)
        }
        Err(KeeperError::InvalidArgument(message)) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(err) => {
            error!(error = %err, "feedback commit failed");
            (StatusCode::INTERNAL_SERVER_ERROR, FEEDBACK_FAILURE_MESSAGE)
                .into_response()
        }
    }
}
