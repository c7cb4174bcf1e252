//! Error types for the Chirp API client

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the Chirp backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    ServerRejection {
        /// HTTP status code
        status: u16,
        /// Response body, parsed as JSON when possible, otherwise a JSON string
        body: Value,
    },

    /// No response was received (connection refused, DNS, timeout, ...)
    #[error("{0}")]
    Unexpected(String),

    /// A 2xx response whose body did not match the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The HTTP client could not be built
    #[error("Client configuration failed: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Whether the server produced a response at all
    #[must_use]
    pub const fn has_response(&self) -> bool {
        matches!(self, Self::ServerRejection { .. })
    }

    /// HTTP status of a server rejection
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerRejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON rejection body, or the body itself when
    /// it is a plain string
    #[must_use]
    pub fn body_message(&self) -> Option<&str> {
        let Self::ServerRejection { body, .. } = self else {
            return None;
        };
        match body {
            Value::String(text) => Some(text.as_str()),
            Value::Object(fields) => fields.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Unexpected(error.to_string())
    }
}
