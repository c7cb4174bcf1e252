//! Unified client error
//!
//! Every slice stores failures as a [`ClientError`] so views can match on one
//! shape regardless of which slice produced it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Where a failure originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Local input check failed; never reaches the network
    Validation,
    /// The backend answered with a failure status
    Server,
    /// No response was received, or the failure could not be classified
    Unexpected,
}

/// Tagged error carried in slice state
///
/// `detail` holds the backend's structured response body for server
/// rejections, verbatim.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ClientError {
    /// Discriminant
    pub kind: ErrorKind,
    /// Human readable message
    pub message: String,
    /// Structured detail from the server, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ClientError {
    /// Local validation failure
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            detail: None,
        }
    }

    /// Server rejection carrying the response body
    #[must_use]
    pub fn server(message: impl Into<String>, detail: Value) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.into(),
            detail: Some(detail),
        }
    }

    /// Failure with no usable response
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            message: message.into(),
            detail: None,
        }
    }

    /// Check the discriminant
    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// The line a view should render for this error
    ///
    /// Prefers a `message` string inside the server detail, then the
    /// top-level message.
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.detail
            .as_ref()
            .and_then(|detail| detail.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(&self.message)
    }
}
