//! Error handling module for the gVote backend.
//!
//! Handlers return `AppError`; it is turned into a status code and a plain-text
//! body at the handler boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::clients::FetchError;
use crate::models::MappingError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const PARAMETER_MISSING: &str = "PARAMETER_MISSING";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const MAPPING_ERROR: &str = "MAPPING_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Required query parameter absent or blank
    ParameterMissing(&'static str),
    /// Referenced record does not exist
    NotFound(String),
    /// Request cannot be served as asked
    BadRequest(String),
    /// A provider call failed
    UpstreamFetch(String),
    /// A provider payload or stored document had the wrong shape
    Mapping(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ParameterMissing(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Mapping(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ParameterMissing(_) => codes::PARAMETER_MISSING,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::UpstreamFetch(_) => codes::UPSTREAM_ERROR,
            AppError::Mapping(_) => codes::MAPPING_ERROR,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message, as sent to the client.
    pub fn message(&self) -> String {
        match self {
            AppError::ParameterMissing(param) => format!("No {} in the query URL.", param),
            AppError::NotFound(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::UpstreamFetch(msg) => msg.clone(),
            AppError::Mapping(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    pub fn election_not_found(election_id: &str) -> Self {
        AppError::NotFound(format!("Election with id {} was not found.", election_id))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        tracing::error!("Upstream error: {:?}", err);
        match err {
            FetchError::Decode(msg) => AppError::Mapping(format!("Unexpected response: {}", msg)),
            other => AppError::UpstreamFetch(format!("Upstream error: {}", other)),
        }
    }
}

impl From<MappingError> for AppError {
    fn from(err: MappingError) -> Self {
        tracing::error!("Mapping error: {:?}", err);
        AppError::Mapping(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}
