use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::mailer::MailError;

/// What the client is told when something on our side breaks. Deliberately
/// generic: transport details stay in the logs.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields: name, email, and message are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Mail transport error: {0}")]
    Mail(#[from] MailError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_display = self.to_string();
        let (status, message) = match self {
            // Expected user error, not a system fault: no log entry
            AppError::MissingFields | AppError::InvalidEmail => {
                (StatusCode::BAD_REQUEST, error_display)
            }
            AppError::Mail(e) => {
                tracing::error!(error = %e, "Failed to deliver contact notification");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!(error = %e, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
