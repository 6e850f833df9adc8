/// Server error types
use crate::services::AuthError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jap_core::JapError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Duplicate submission: {0}")]
    Duplicate(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<JapError> for ServerError {
    fn from(err: JapError) -> Self {
        match err {
            JapError::Validation(msg) => ServerError::BadRequest(msg),
            JapError::UserNotFound => ServerError::NotFound("User not found".to_string()),
            JapError::UnknownUser(ref user_id) => {
                tracing::warn!(%user_id, "Token refers to a missing user");
                ServerError::NotFound("User not found".to_string())
            }
            JapError::DuplicateSubmission { .. } => ServerError::Duplicate(err.to_string()),
            JapError::Storage(msg) => ServerError::Storage(msg),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ServerError::BadRequest("Invalid request body".to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Auth(AuthError::MissingToken) => (
                StatusCode::UNAUTHORIZED,
                "Access denied. No token provided.".to_string(),
            ),
            ServerError::Auth(AuthError::InvalidOrExpired) => (
                StatusCode::FORBIDDEN,
                "Invalid or expired token.".to_string(),
            ),
            ServerError::Auth(AuthError::Encoding(ref e)) => {
                tracing::error!("Token signing error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Duplicate(ref msg) => {
                tracing::info!("Duplicate submission: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "Data already exists for today. Cannot submit again.".to_string(),
                )
            }
            ServerError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
