//! Reducer for the auth slice.
//!
//! Every command applies the pending transition, issues a request id and
//! returns one future effect that calls the backend and feeds back the
//! matching `*Settled` action.

use super::{auth_error, AuthAction, AuthOperation, AuthState};
use crate::environment::ChirpEnvironment;
use chirp_api::ChirpApi;
use chirp_core::async_call::settle;
use chirp_core::{effect::Effect, reducer::Reducer, smallvec, AsyncOutcome, RequestId, SmallVec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Reducer for the auth slice
#[derive(Debug)]
pub struct AuthReducer<C> {
    _phantom: PhantomData<fn() -> C>,
}

impl<C> AuthReducer<C> {
    /// Creates a new `AuthReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Pending transition shared by every auth request
    fn begin(state: &mut AuthState, operation: AuthOperation, request_id: RequestId) {
        state.loading = true;
        state.error = None;
        state.success = false;
        state.fence.begin(operation, request_id);
        tracing::debug!(%request_id, ?operation, "Auth request pending");
    }

    /// Terminal transition shared by every auth request
    ///
    /// `on_fulfilled` applies the payload; stale completions are dropped
    /// under the latest-only policy. `loading` stays set while another
    /// admitted request is outstanding.
    fn finish<T>(
        state: &mut AuthState,
        env: &ChirpEnvironment<C>,
        operation: AuthOperation,
        request_id: RequestId,
        outcome: AsyncOutcome<T>,
        on_fulfilled: impl FnOnce(&mut AuthState, T),
    ) {
        let admitted = env.fencing.admits(&state.fence, operation, request_id);
        state.fence.complete(request_id);
        if !admitted {
            tracing::debug!(%request_id, ?operation, "Ignoring stale auth completion");
            return;
        }

        state.loading = env.fencing.is_busy(&state.fence);
        match outcome {
            AsyncOutcome::Fulfilled(payload) => {
                tracing::debug!(%request_id, ?operation, "Auth request fulfilled");
                state.error = None;
                state.success = true;
                on_fulfilled(state, payload);
            },
            AsyncOutcome::Rejected(error) => {
                tracing::warn!(%request_id, ?operation, error = %error.display_message(), "Auth request rejected");
                state.error = Some(error);
                state.success = false;
            },
        }
    }
}

impl<C> Default for AuthReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Reducer for AuthReducer<C>
where
    C: ChirpApi + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = ChirpEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Commands: pending transition + backend call
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignUp { request_id, request } => {
                Self::begin(state, AuthOperation::SignUp, request_id);
                let api = Arc::clone(&env.api);
                smallvec![settle(
                    async move { api.sign_up(request).await.map_err(auth_error) },
                    move |outcome| AuthAction::SignUpSettled { request_id, outcome },
                )]
            },

            AuthAction::SignIn { request_id, request } => {
                Self::begin(state, AuthOperation::SignIn, request_id);
                let api = Arc::clone(&env.api);
                smallvec![settle(
                    async move { api.sign_in(request).await.map_err(auth_error) },
                    move |outcome| AuthAction::SignInSettled { request_id, outcome },
                )]
            },

            AuthAction::ChangePassword { request_id, request } => {
                Self::begin(state, AuthOperation::ChangePassword, request_id);
                let api = Arc::clone(&env.api);
                smallvec![settle(
                    async move { api.change_password(request).await.map_err(auth_error) },
                    move |outcome| AuthAction::ChangePasswordSettled { request_id, outcome },
                )]
            },

            AuthAction::ResetAuthState => {
                state.user = None;
                state.loading = false;
                state.error = None;
                state.success = false;
                // In-flight requests become superseded
                state.fence.clear();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Completions
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignUpSettled { request_id, outcome } => {
                Self::finish(state, env, AuthOperation::SignUp, request_id, outcome, |state, user| {
                    state.user = Some(user);
                });
                smallvec![Effect::None]
            },

            AuthAction::SignInSettled { request_id, outcome } => {
                Self::finish(state, env, AuthOperation::SignIn, request_id, outcome, |state, user| {
                    state.user = Some(user);
                });
                smallvec![Effect::None]
            },

            AuthAction::ChangePasswordSettled { request_id, outcome } => {
                // The success body is opaque; the user is left untouched
                Self::finish(state, env, AuthOperation::ChangePassword, request_id, outcome, |_, _| {});
                smallvec![Effect::None]
            },
        }
    }
}
