//! Tweets slice: the visible tweet list and the fetch/create lifecycle.

use chirp_api::{ApiError, NewTweet, Tweet};
use chirp_core::{AsyncOutcome, ClientError, RequestFence, RequestId};

pub mod reducer;

pub use reducer::TweetsReducer;

/// Fallback message when a failure carries no message
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// Tweets operations tracked by the request fence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TweetsOperation {
    /// Replace the list from the backend
    Fetch,
    /// Post one tweet
    Create,
}

/// Tweets slice state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweetsState {
    /// Tweets in display order
    pub tweets: Vec<Tweet>,
    /// A request is in flight
    pub loading: bool,
    /// Failure of the last settled request
    pub error: Option<ClientError>,
    /// Latest request id per operation
    pub fence: RequestFence<TweetsOperation>,
}

/// Tweets slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum TweetsAction {
    // Commands
    /// Load the full list
    FetchTweets {
        /// Id the completion will carry
        request_id: RequestId,
    },
    /// Post a tweet
    CreateTweet {
        /// Id the completion will carry
        request_id: RequestId,
        /// Body
        tweet: NewTweet,
    },

    // Completions
    /// A fetch settled
    FetchSettled {
        /// Request the completion belongs to
        request_id: RequestId,
        /// Result
        outcome: AsyncOutcome<Vec<Tweet>>,
    },
    /// A create settled
    CreateSettled {
        /// Request the completion belongs to
        request_id: RequestId,
        /// Result
        outcome: AsyncOutcome<Tweet>,
    },
}

impl TweetsAction {
    /// The operation a completion settles, if this is a completion
    #[must_use]
    pub const fn settles(&self) -> Option<TweetsOperation> {
        match self {
            Self::FetchSettled { .. } => Some(TweetsOperation::Fetch),
            Self::CreateSettled { .. } => Some(TweetsOperation::Create),
            Self::FetchTweets { .. } | Self::CreateTweet { .. } => None,
        }
    }

    /// The request a completion settles, if this is a completion
    #[must_use]
    pub const fn settled_request(&self) -> Option<RequestId> {
        match self {
            Self::FetchSettled { request_id, .. } | Self::CreateSettled { request_id, .. } => Some(*request_id),
            Self::FetchTweets { .. } | Self::CreateTweet { .. } => None,
        }
    }

    /// The error carried by a rejected completion
    #[must_use]
    pub const fn rejection(&self) -> Option<&ClientError> {
        match self {
            Self::FetchSettled {
                outcome: AsyncOutcome::Rejected(error),
                ..
            }
            | Self::CreateSettled {
                outcome: AsyncOutcome::Rejected(error),
                ..
            } => Some(error),
            _ => None,
        }
    }
}

/// Classify a tweets request failure
///
/// The message is the failure's own message, or [`FALLBACK_ERROR`] when it is
/// empty. Server rejections keep their body as detail.
#[must_use]
pub fn tweets_error(error: ApiError) -> ClientError {
    let message = error.to_string();
    let message = if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    };

    match error {
        ApiError::ServerRejection { body, .. } => ClientError::server(message, body),
        ApiError::Unexpected(_) | ApiError::Decode(_) | ApiError::Configuration(_) => {
            ClientError::unexpected(message)
        },
    }
}
