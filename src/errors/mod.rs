//! Error handling module for the game catalog backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const MISSING_FIELDS: &str = "MISSING_FIELDS";
    pub const CONFLICT: &str = "CONFLICT";
    pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
    pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid field value
    Validation(String),
    /// Required fields absent or empty, in request order
    MissingFields(Vec<String>),
    /// Business-rule conflict such as a duplicate title
    Conflict(String),
    /// The data file could not be written
    Persistence(String),
    /// Known route, unsupported HTTP method
    MethodNotAllowed(String),
    /// Bad request
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::MissingFields(_) => codes::MISSING_FIELDS,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::Persistence(_) => codes::PERSISTENCE_ERROR,
            AppError::MethodNotAllowed(_) => codes::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::MissingFields(fields) => {
                format!("Missing required fields: {}", fields.join(", "))
            }
            AppError::Conflict(msg) => msg.clone(),
            AppError::Persistence(msg) => msg.clone(),
            AppError::MethodNotAllowed(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateTitle(title) => {
                AppError::Conflict(format!("A game titled \"{}\" already exists", title))
            }
            StoreError::UnknownGame(id) => AppError::Validation(format!("Game {} not found", id)),
            StoreError::Persistence(msg) => {
                // The detail names filesystem paths; keep it in the logs only.
                tracing::error!("Persistence error: {}", msg);
                AppError::Persistence("Failed to save catalog data".to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::MissingFields(fields) => {
                Some(serde_json::json!({ "missingFields": fields }))
            }
            _ => None,
        };

        Self {
            error: error.message(),
            code: error.error_code().to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
