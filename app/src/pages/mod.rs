//! Headless page models.
//!
//! Each page owns its form fields and field errors, validates locally before
//! dispatching, and waits for the store to settle the request it sent,
//! matched by request id. Rendering is left to the caller: pages expose what
//! to show, not how.

use crate::app::{AppAction, AppState, AppStore};
use crate::auth::AuthState;
use crate::router::Router;
use crate::tweets::{TweetsAction, TweetsState};
use chirp_api::ChirpApi;
use chirp_core::{AsyncOutcome, ClientError, FencingPolicy, RequestId};
use chirp_runtime::StoreError;
use std::time::Duration;

pub mod change_password;
pub mod create_tweet;
pub mod login;
pub mod signup;
pub mod view_tweets;

pub use change_password::ChangePasswordPage;
pub use create_tweet::CreateTweetPage;
pub use login::LoginPage;
pub use signup::SignUpPage;
pub use view_tweets::ViewTweetsPage;

/// What a page needs to submit: the store, navigation and a wait bound
pub struct PageContext<C>
where
    C: ChirpApi + 'static,
{
    /// Application store
    pub store: AppStore<C>,
    /// Navigation state
    pub router: Router,
    /// How long to wait for a request to settle
    pub request_wait: Duration,
}

impl<C> PageContext<C>
where
    C: ChirpApi + 'static,
{
    /// Bundle a store and router
    #[must_use]
    pub const fn new(store: AppStore<C>, router: Router, request_wait: Duration) -> Self {
        Self {
            store,
            router,
            request_wait,
        }
    }

    /// Send the command built from a fresh request id and wait for that
    /// request's own completion
    ///
    /// The completion has been reduced when this returns. A completion the
    /// slice ignored because a newer request of the same kind replaced it
    /// is reported as [`Submitted::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the request does not settle within
    /// the wait bound, or the store's error if it rejects the dispatch.
    pub async fn request<A>(&self, command: impl FnOnce(RequestId) -> A) -> Result<Submitted, StoreError>
    where
        A: Into<AppAction>,
    {
        let environment = self.store.environment();
        let request_id = environment.next_request_id();
        let fencing = environment.fencing;

        let settled = self
            .store
            .send_and_wait_for(
                command(request_id).into(),
                |action| action.settled_request() == Some(request_id),
                self.request_wait,
            )
            .await?;

        let applied = self
            .store
            .state(|state| was_applied(fencing, state, &settled, request_id))
            .await;
        if !applied {
            tracing::debug!(%request_id, "Request superseded before it settled");
            return Ok(Submitted::Superseded);
        }
        Ok(outcome_of(&settled))
    }
}

impl<C> Clone for PageContext<C>
where
    C: ChirpApi + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            router: self.router.clone(),
            request_wait: self.request_wait,
        }
    }
}

/// Result of a submit
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    /// Field validation failed; nothing was dispatched
    Invalid,
    /// The request was fulfilled
    Succeeded,
    /// The request was rejected
    Failed(ClientError),
    /// A newer request of the same kind replaced this one; its result was
    /// not applied
    Superseded,
}

impl Submitted {
    /// Whether the request was fulfilled
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Slice feedback a page renders: loading, error and success
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    /// A request is in flight
    pub loading: bool,
    /// Error line to show
    pub error: Option<String>,
    /// The last request succeeded
    pub success: bool,
}

impl FormStatus {
    /// Feedback from the auth slice
    #[must_use]
    pub fn from_auth(auth: &AuthState) -> Self {
        Self {
            loading: auth.loading,
            error: auth.error.as_ref().map(|e| e.display_message().to_string()),
            success: auth.success,
        }
    }

    /// Feedback from the tweets slice
    #[must_use]
    pub fn from_tweets(tweets: &TweetsState) -> Self {
        Self {
            loading: tweets.loading,
            error: tweets.error.as_ref().map(|e| e.message.clone()),
            success: false,
        }
    }

    /// Lines to display, `Loading...` before `Error: ...`
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.loading {
            lines.push("Loading...".to_string());
        }
        if let Some(error) = &self.error {
            lines.push(format!("Error: {error}"));
        }
        lines
    }
}

/// Rejection carried by a settled action of either request slice
fn rejection(action: &AppAction) -> Option<ClientError> {
    match action {
        AppAction::Auth(action) => action.rejection().cloned(),
        AppAction::Tweets(action) => action.rejection().cloned(),
        AppAction::Users(_) => None,
    }
}

/// Whether the slice applied the completion of `request_id`
fn was_applied(fencing: FencingPolicy, state: &AppState, settled: &AppAction, request_id: RequestId) -> bool {
    match settled {
        AppAction::Auth(_) => fencing.applied(&state.auth.fence, request_id),
        // A fulfilled create is appended even when superseded
        AppAction::Tweets(TweetsAction::CreateSettled {
            outcome: AsyncOutcome::Fulfilled(_),
            ..
        }) => true,
        AppAction::Tweets(_) => fencing.applied(&state.tweets.fence, request_id),
        AppAction::Users(_) => true,
    }
}

/// Map a settled action to a submit result
fn outcome_of(settled: &AppAction) -> Submitted {
    rejection(settled).map_or(Submitted::Succeeded, Submitted::Failed)
}

/// Read the auth slice's status from a state snapshot
#[must_use]
pub fn auth_status(state: &AppState) -> FormStatus {
    FormStatus::from_auth(&state.auth)
}

/// Read the tweets slice's status from a state snapshot
#[must_use]
pub fn tweets_status(state: &AppState) -> FormStatus {
    FormStatus::from_tweets(&state.tweets)
}
