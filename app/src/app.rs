//! Composed application state, actions and store.
//!
//! The three slices live under the fixed keys `auth`, `tweets` and `users`;
//! each slice reducer is scoped to its key and the scoped reducers are
//! combined into one.

use crate::auth::{AuthAction, AuthReducer, AuthState};
use crate::config::AppConfig;
use crate::environment::ChirpEnvironment;
use crate::tweets::{TweetsAction, TweetsReducer, TweetsState};
use crate::users::{UsersAction, UsersReducer, UsersState};
use chirp_api::{ApiError, ChirpApi, HttpChirpApi};
use chirp_core::composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer};
use chirp_core::RequestId;
use chirp_runtime::Store;

/// Root state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Session and auth requests
    pub auth: AuthState,
    /// Tweet list and tweet requests
    pub tweets: TweetsState,
    /// Locally known users
    pub users: UsersState,
}

/// Root action
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Routed to the auth slice
    Auth(AuthAction),
    /// Routed to the tweets slice
    Tweets(TweetsAction),
    /// Routed to the users slice
    Users(UsersAction),
}

impl AppAction {
    /// The request a completion settles, if this is a completion
    #[must_use]
    pub const fn settled_request(&self) -> Option<RequestId> {
        match self {
            Self::Auth(action) => action.settled_request(),
            Self::Tweets(action) => action.settled_request(),
            Self::Users(_) => None,
        }
    }
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<TweetsAction> for AppAction {
    fn from(action: TweetsAction) -> Self {
        Self::Tweets(action)
    }
}

impl From<UsersAction> for AppAction {
    fn from(action: UsersAction) -> Self {
        Self::Users(action)
    }
}

/// Root reducer
pub type AppReducer<C> = CombinedReducer<AppState, AppAction, ChirpEnvironment<C>>;

/// Store holding the composed state
pub type AppStore<C> = Store<AppState, AppAction, ChirpEnvironment<C>, AppReducer<C>>;

/// Build the root reducer from the three slice reducers
#[must_use]
pub fn app_reducer<C: ChirpApi + 'static>() -> AppReducer<C> {
    let reducers: Vec<BoxedReducer<AppState, AppAction, ChirpEnvironment<C>>> = vec![
        Box::new(scope_reducer(
            AuthReducer::<C>::new(),
            |state: &mut AppState| &mut state.auth,
            |action| match action {
                AppAction::Auth(action) => Some(action),
                _ => None,
            },
            AppAction::Auth,
        )),
        Box::new(scope_reducer(
            TweetsReducer::<C>::new(),
            |state: &mut AppState| &mut state.tweets,
            |action| match action {
                AppAction::Tweets(action) => Some(action),
                _ => None,
            },
            AppAction::Tweets,
        )),
        Box::new(scope_reducer(
            UsersReducer::<C>::new(),
            |state: &mut AppState| &mut state.users,
            |action| match action {
                AppAction::Users(action) => Some(action),
                _ => None,
            },
            AppAction::Users,
        )),
    ];
    combine_reducers(reducers)
}

/// Create a store with initial state over the given environment
#[must_use]
pub fn create_store<C: ChirpApi + 'static>(environment: ChirpEnvironment<C>) -> AppStore<C> {
    Store::new(AppState::default(), app_reducer(), environment)
}

/// Create a store talking to the configured backend over HTTP
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
pub fn connect(config: &AppConfig) -> Result<AppStore<HttpChirpApi>, ApiError> {
    let api = HttpChirpApi::new(config.api.clone())?;
    tracing::info!(base_url = %api.client().base_url(), fencing = ?config.fencing, "Store created");
    Ok(create_store(ChirpEnvironment::new(api).with_fencing(config.fencing)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserProfile;
    use chirp_api::mocks::MockChirpApi;
    use chirp_core::Reducer;

    #[test]
    fn actions_reach_only_their_slice() {
        let reducer = app_reducer::<MockChirpApi>();
        let env = ChirpEnvironment::new(MockChirpApi::new());
        let mut state = AppState::default();

        let fetch = TweetsAction::FetchTweets {
            request_id: env.next_request_id(),
        };
        let effects = reducer.reduce(&mut state, AppAction::Tweets(fetch), &env);
        assert_eq!(effects.len(), 1);
        assert!(state.tweets.loading);
        assert!(!state.auth.loading);

        let _ = reducer.reduce(
            &mut state,
            UsersAction::Loaded(vec![UserProfile {
                id: 4,
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            }])
            .into(),
            &env,
        );
        assert_eq!(state.users.label(4), "Grace");
        assert!(state.tweets.loading);

        let _ = reducer.reduce(&mut state, AuthAction::ResetAuthState.into(), &env);
        assert!(state.auth.is_reset());
        assert_eq!(state.users.users.len(), 1);
    }

    #[test]
    fn settled_request_reaches_through_the_root_action() {
        let settled = AppAction::from(TweetsAction::CreateSettled {
            request_id: RequestId::new(9),
            outcome: chirp_core::AsyncOutcome::Rejected(chirp_core::ClientError::unexpected("down")),
        });
        assert_eq!(settled.settled_request(), Some(RequestId::new(9)));
        assert_eq!(AppAction::from(UsersAction::Cleared).settled_request(), None);
    }
}
