//! HTTP error handling and response conversion.
//!
//! Every failure a request can hit ends up here: domain errors returned by
//! handlers, rejected JSON bodies or query strings, unmatched routes, timed
//! out requests and handler panics. This is the only module that decides the
//! status code and body of an error response.
//!
//! Client faults carry their message through to the caller. Internal failures
//! are logged with full detail but answered with a generic message.

use crate::domain::listing::errors::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use ts_rs::TS;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
}

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource or route not found (404).
    NotFound(String),

    /// Malformed request, e.g. an unparseable body (400).
    BadRequest(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Request body exceeded the configured limit (413).
    PayloadTooLarge,

    /// Path exists but not for this method (405).
    MethodNotAllowed,

    /// Request exceeded the configured deadline (408).
    Timeout,

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::PayloadTooLarge => write!(f, "Payload too large"),
            Self::MethodNotAllowed => write!(f, "Method not allowed"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) => msg.clone(),
            Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError(msg) => msg.clone(),
            Self::PayloadTooLarge => "Payload Too Large".into(),
            Self::MethodNotAllowed => "Method Not Allowed".into(),
            Self::Timeout => "Request Timed Out".into(),
            Self::Internal(_) => "Internal Server Error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.user_message(),
        };

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST
            | StatusCode::REQUEST_TIMEOUT
            | StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::debug!("error={}", self);
            }
        }

        (status, Json(body)).into_response()
    }
}

pub type HandlerResult<T> = Result<T, AppError>;

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::ValidationError(msg) => AppError::ValidationError(msg),
            DomainError::InfrastructureError(msg) => AppError::Internal(msg),
        }
    }
}

// === Extractor Rejection Conversion ===

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Response for a panicking handler, installed through `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
