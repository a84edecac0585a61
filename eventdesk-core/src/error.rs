//! Error types for eventdesk.
//!
//! Every failure a coordinator operation can report is an [`ApiError`].
//! Whatever the variant, callers can render it uniformly through
//! [`ApiError::message`] and [`ApiError::status`].

use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries no usable `message` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Status reported for input rejected before it reaches the network.
pub const VALIDATION_STATUS: u16 = 422;

/// Status reported when the request never produced a response
/// (connection refused, DNS failure, timeout).
pub const UNREACHABLE_STATUS: u16 = 503;

/// Status reported when a 2xx body does not match the expected shape.
pub const BAD_GATEWAY_STATUS: u16 = 502;

/// A single failed input check: which field, and why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the transport and the event coordinator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Input failed local checks; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure, timeout, or a non-2xx response.
    #[error("{message}")]
    Transport { status: u16, message: String },

    /// The server answered 2xx with a body that is not a valid event.
    #[error("Unexpected response from server: {0}")]
    ResponseShape(String),
}

impl ApiError {
    /// HTTP-style status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) => VALIDATION_STATUS,
            ApiError::Transport { status, .. } => *status,
            ApiError::ResponseShape(_) => BAD_GATEWAY_STATUS,
        }
    }

    /// Human-readable message for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Build a transport error from a failed response's status and
    /// (possibly absent or non-JSON) body.
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        ApiError::Transport {
            status,
            message: error_message(body),
        }
    }

    /// Build a transport error for a request that never got a response.
    pub fn unreachable(reason: impl std::fmt::Display) -> Self {
        ApiError::Transport {
            status: UNREACHABLE_STATUS,
            message: format!("Could not reach the server: {reason}"),
        }
    }
}

/// Pull the `message` string out of an error body, or fall back to the
/// generic message.
pub fn error_message(body: Option<&Value>) -> String {
    body.and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while loading or writing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_from_body() {
        let body = json!({ "message": "Event not found" });
        assert_eq!(error_message(Some(&body)), "Event not found");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(None), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message(Some(&json!({ "error": "x" }))), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message(Some(&json!({ "message": 42 }))), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message(Some(&json!("plain string"))), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_uniform_status_and_message() {
        let validation: ApiError = ValidationError::new("title", "Title is required").into();
        assert_eq!(validation.status(), 422);
        assert_eq!(validation.message(), "Title is required");

        let transport = ApiError::from_response(404, Some(&json!({ "message": "Event not found" })));
        assert_eq!(transport.status(), 404);
        assert_eq!(transport.message(), "Event not found");

        let shape = ApiError::ResponseShape("missing field `id`".into());
        assert_eq!(shape.status(), 502);
        assert!(shape.message().contains("missing field `id`"));

        let unreachable = ApiError::unreachable("connection refused");
        assert_eq!(unreachable.status(), 503);
    }
}
