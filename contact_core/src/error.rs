//! Application error types and handling

use crate::{mail::MailError, validation::ValidationResult};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

pub const CONTACT_FAILURE_MESSAGE: &str =
    "Failed to process contact form. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(ValidationResult),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Compose error: {0}")]
    Compose(#[from] MailError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::Validation(result) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                Some(json!(result.errors)),
            ),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            AppError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Dispatch(msg) => {
                tracing::error!("Error processing contact form: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONTACT_FAILURE_MESSAGE.to_string(),
                    None,
                )
            }
            AppError::Compose(err) => {
                tracing::error!("Error composing contact emails: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONTACT_FAILURE_MESSAGE.to_string(),
                    None,
                )
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16(),
        });

        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}
