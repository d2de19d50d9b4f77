//! API error types with IntoResponse
//!
//! Every failure renders as `{"error": "<message>"}`. Validation messages go
//! back verbatim; store and body failures are logged and replaced with a
//! generic message.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// Message returned for every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Store failure (500, logged)
    Database {
        action: &'static str,
        source: DbError,
    },

    /// Request body could not be read (500, logged)
    Body(BytesRejection),

    /// Request body is not a JSON object of strings (500, logged)
    MalformedJson(serde_json::Error),
}

impl ApiError {
    /// Wrap a store failure with what the handler was doing, for the log line.
    pub fn store(action: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Database { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::Body(_) | Self::MalformedJson(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => {
                tracing::debug!(error = ?e, "rejected submission");
                e.to_string()
            }
            Self::Database { action, source } => {
                // Log the actual error, return generic message
                tracing::error!(error = %source, "Error {}", action);
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            Self::Body(rejection) => {
                tracing::error!(error = %rejection, "Error reading request body");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            Self::MalformedJson(e) => {
                tracing::error!(error = %e, "Error parsing request body");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(e: BytesRejection) -> Self {
        Self::Body(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedJson(e)
    }
}
