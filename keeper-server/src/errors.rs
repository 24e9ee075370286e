use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use keeper_core::{ErrorKind, KeeperError};

pub type AppResult<T> = Result<T, AppError>;

pub const DUPLICATE_FAVORITE_MESSAGE: &str = "Favorite exists already!";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// JSON error body for the favorites API: `{ "message": ..., "code": ... }`.
///
/// The registry contract reports every failure as a 500; `code` lets a
/// client tell a duplicate name apart from an outage.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
}

impl AppError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
            "code": self.code,
        }));

        (self.status, body).into_response()
    }
}

pub fn error_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidArgument => "invalid_argument",
        ErrorKind::DuplicateIdentity => "duplicate_identity",
        ErrorKind::StoreUnavailable => "store_unavailable",
        ErrorKind::StoreWriteFailed => "store_write_failed",
        ErrorKind::StageWriteFailed => "stage_write_failed",
        ErrorKind::UpstreamUnavailable => "upstream_unavailable",
        ErrorKind::Io => "io",
    }
}

impl From<KeeperError> for AppError {
    fn from(err: KeeperError) -> Self {
        let code = error_code(err.kind());
        if err.is_infrastructure() {
            tracing::error!(error = %err, "request failed");
            return Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                GENERIC_FAILURE_MESSAGE,
            );
        }

        let message = match err {
            KeeperError::InvalidArgument(message) => message,
            _ => DUPLICATE_FAVORITE_MESSAGE.to_string(),
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }
}
