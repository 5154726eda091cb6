//! REST API module.
//!
//! Translates HTTP requests into store calls. Input validation lives here,
//! business state lives in the store.

mod games;
mod stats;

pub use games::*;
pub use stats::*;

use axum::{http::Method, Json};

use crate::errors::AppError;

/// Response type for every handler: a JSON body or an error envelope.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Fallback for unknown routes, so even these get a JSON error body.
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(format!("Method {} is not allowed on this route", method))
}
