//! Auth slice: session user and the sign-up, sign-in and change-password
//! request lifecycle.

use chirp_api::{ApiError, ChangePasswordRequest, SignInRequest, SignUpRequest, User};
use chirp_core::{AsyncOutcome, ClientError, RequestFence, RequestId};
use serde_json::Value;

pub mod reducer;

pub use reducer::AuthReducer;

/// Fallback message when no response was received
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Auth operations tracked by the request fence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthOperation {
    /// Account creation
    SignUp,
    /// Authentication
    SignIn,
    /// Password change
    ChangePassword,
}

/// Auth slice state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// Current session user; `None` until a sign-in or sign-up succeeds
    pub user: Option<User>,
    /// A request is in flight
    pub loading: bool,
    /// Failure of the last settled request
    pub error: Option<ClientError>,
    /// The last settled request succeeded
    pub success: bool,
    /// Latest request id per operation
    pub fence: RequestFence<AuthOperation>,
}

impl AuthState {
    /// Whether a user is signed in
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the observable fields equal the reset state
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        self.user.is_none() && !self.loading && self.error.is_none() && !self.success
    }
}

/// Auth slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    // Commands
    /// Create an account
    SignUp {
        /// Id the completion will carry
        request_id: RequestId,
        /// Body
        request: SignUpRequest,
    },
    /// Authenticate
    SignIn {
        /// Id the completion will carry
        request_id: RequestId,
        /// Body
        request: SignInRequest,
    },
    /// Change the signed-in user's password
    ChangePassword {
        /// Id the completion will carry
        request_id: RequestId,
        /// Body
        request: ChangePasswordRequest,
    },
    /// Return to the initial state
    ResetAuthState,

    // Completions
    /// A sign-up request settled
    SignUpSettled {
        /// Request the completion belongs to
        request_id: RequestId,
        /// Result
        outcome: AsyncOutcome<User>,
    },
    /// A sign-in request settled
    SignInSettled {
        /// Request the completion belongs to
        request_id: RequestId,
        /// Result
        outcome: AsyncOutcome<User>,
    },
    /// A change-password request settled
    ChangePasswordSettled {
        /// Request the completion belongs to
        request_id: RequestId,
        /// Result; the success body is opaque
        outcome: AsyncOutcome<Value>,
    },
}

impl AuthAction {
    /// The operation a completion settles, if this is a completion
    #[must_use]
    pub const fn settles(&self) -> Option<AuthOperation> {
        match self {
            Self::SignUpSettled { .. } => Some(AuthOperation::SignUp),
            Self::SignInSettled { .. } => Some(AuthOperation::SignIn),
            Self::ChangePasswordSettled { .. } => Some(AuthOperation::ChangePassword),
            _ => None,
        }
    }

    /// The request a completion settles, if this is a completion
    #[must_use]
    pub const fn settled_request(&self) -> Option<RequestId> {
        match self {
            Self::SignUpSettled { request_id, .. }
            | Self::SignInSettled { request_id, .. }
            | Self::ChangePasswordSettled { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    /// The error carried by a rejected completion
    #[must_use]
    pub const fn rejection(&self) -> Option<&ClientError> {
        match self {
            Self::SignUpSettled {
                outcome: AsyncOutcome::Rejected(error),
                ..
            }
            | Self::SignInSettled {
                outcome: AsyncOutcome::Rejected(error),
                ..
            }
            | Self::ChangePasswordSettled {
                outcome: AsyncOutcome::Rejected(error),
                ..
            } => Some(error),
            _ => None,
        }
    }
}

/// Classify an auth request failure
///
/// A server rejection keeps the response body verbatim as detail, with the
/// body's `message` (or its text) as the message. Anything without a
/// response becomes the fixed fallback.
#[must_use]
pub fn auth_error(error: ApiError) -> ClientError {
    let message = error.body_message().map(str::to_string);
    match error {
        ApiError::ServerRejection { status, body } => {
            let message = message.unwrap_or_else(|| {
                if body.is_null() {
                    format!("Request failed with status code {status}")
                } else {
                    body.to_string()
                }
            });
            ClientError::server(message, body)
        },
        ApiError::Unexpected(_) | ApiError::Decode(_) | ApiError::Configuration(_) => {
            ClientError::unexpected(UNEXPECTED_ERROR)
        },
    }
}
