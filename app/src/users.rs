//! Users slice: locally known user profiles.
//!
//! The backend has no users endpoint, so this slice is populated by the
//! application itself, from a JSON directory file named by `USERS_FILE`.
//! Create-tweet reads it to label share targets.

use crate::environment::ChirpEnvironment;
use chirp_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A known user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
}

/// Users slice state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    /// Known users
    pub users: Vec<UserProfile>,
}

impl UsersState {
    /// Look up a profile by id
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&UserProfile> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Name for an id, or `#<id>` when unknown
    #[must_use]
    pub fn label(&self, id: i64) -> String {
        self.find(id)
            .map_or_else(|| format!("#{id}"), |user| user.name.clone())
    }
}

/// Parse a user directory: a JSON array of `{id, name, email}` objects
///
/// # Errors
///
/// Returns the decode error when the text is not such an array.
pub fn parse_directory(json: &str) -> Result<Vec<UserProfile>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Users slice actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersAction {
    /// Replace the known users
    Loaded(Vec<UserProfile>),
    /// Forget all known users
    Cleared,
}

/// Reducer for the users slice
#[derive(Debug)]
pub struct UsersReducer<C> {
    _phantom: PhantomData<fn() -> C>,
}

impl<C> UsersReducer<C> {
    /// Creates a new `UsersReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<C> Default for UsersReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Reducer for UsersReducer<C> {
    type State = UsersState;
    type Action = UsersAction;
    type Environment = ChirpEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            UsersAction::Loaded(users) => {
                tracing::debug!(count = users.len(), "Users loaded");
                state.users = users;
            },
            UsersAction::Cleared => state.users.clear(),
        }
        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_api::mocks::MockChirpApi;
    use chirp_testing::{assertions, ReducerTest};

    fn ada() -> UserProfile {
        UserProfile {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn loaded_replaces_users() {
        ReducerTest::new(UsersReducer::<MockChirpApi>::new())
            .with_env(ChirpEnvironment::new(MockChirpApi::new()))
            .given_state(UsersState::default())
            .when_action(UsersAction::Loaded(vec![ada()]))
            .then_state(|state| {
                assert_eq!(state.label(1), "Ada");
                assert_eq!(state.label(2), "#2");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn directory_parses_profiles() {
        let users = parse_directory(r#"[{"id": 1, "name": "Ada", "email": "ada@example.com"}]"#).unwrap();
        assert_eq!(users, vec![ada()]);

        assert!(parse_directory(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn cleared_forgets_users() {
        let state = ReducerTest::new(UsersReducer::<MockChirpApi>::new())
            .with_env(ChirpEnvironment::new(MockChirpApi::new()))
            .given_state(UsersState { users: vec![ada()] })
            .when_action(UsersAction::Cleared)
            .run();
        assert!(state.find(1).is_none());
    }
}
