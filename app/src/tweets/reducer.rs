//! Reducer for the tweets slice.

use super::{tweets_error, TweetsAction, TweetsOperation, TweetsState};
use crate::environment::ChirpEnvironment;
use chirp_api::ChirpApi;
use chirp_core::async_call::settle;
use chirp_core::{effect::Effect, reducer::Reducer, smallvec, AsyncOutcome, RequestId, SmallVec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Reducer for the tweets slice
#[derive(Debug)]
pub struct TweetsReducer<C> {
    _phantom: PhantomData<fn() -> C>,
}

impl<C> TweetsReducer<C> {
    /// Creates a new `TweetsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    fn begin(state: &mut TweetsState, operation: TweetsOperation, request_id: RequestId) {
        state.loading = true;
        state.error = None;
        state.fence.begin(operation, request_id);
        tracing::debug!(%request_id, ?operation, "Tweets request pending");
    }

    /// Apply the status fields of a terminal transition
    ///
    /// Returns the payload when the completion is admitted. `loading` stays
    /// set while another admitted request is outstanding.
    fn finish<T>(
        state: &mut TweetsState,
        env: &ChirpEnvironment<C>,
        operation: TweetsOperation,
        request_id: RequestId,
        outcome: AsyncOutcome<T>,
    ) -> Option<T> {
        let admitted = env.fencing.admits(&state.fence, operation, request_id);
        state.fence.complete(request_id);
        if !admitted {
            tracing::debug!(%request_id, ?operation, "Ignoring stale tweets completion");
            return None;
        }

        state.loading = env.fencing.is_busy(&state.fence);
        match outcome {
            AsyncOutcome::Fulfilled(payload) => {
                state.error = None;
                Some(payload)
            },
            AsyncOutcome::Rejected(error) => {
                tracing::warn!(%request_id, ?operation, error = %error.message, "Tweets request rejected");
                state.error = Some(error);
                None
            },
        }
    }
}

impl<C> Default for TweetsReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Reducer for TweetsReducer<C>
where
    C: ChirpApi + 'static,
{
    type State = TweetsState;
    type Action = TweetsAction;
    type Environment = ChirpEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TweetsAction::FetchTweets { request_id } => {
                Self::begin(state, TweetsOperation::Fetch, request_id);
                let api = Arc::clone(&env.api);
                smallvec![settle(
                    async move { api.fetch_tweets().await.map_err(tweets_error) },
                    move |outcome| TweetsAction::FetchSettled { request_id, outcome },
                )]
            },

            TweetsAction::CreateTweet { request_id, tweet } => {
                Self::begin(state, TweetsOperation::Create, request_id);
                let api = Arc::clone(&env.api);
                smallvec![settle(
                    async move { api.create_tweet(tweet).await.map_err(tweets_error) },
                    move |outcome| TweetsAction::CreateSettled { request_id, outcome },
                )]
            },

            TweetsAction::FetchSettled { request_id, outcome } => {
                if let Some(tweets) = Self::finish(state, env, TweetsOperation::Fetch, request_id, outcome) {
                    tracing::debug!(count = tweets.len(), "Replacing tweets");
                    state.tweets = tweets;
                }
                smallvec![Effect::None]
            },

            TweetsAction::CreateSettled { request_id, outcome } => {
                // A created tweet exists on the backend whether or not the
                // call was superseded, so a stale one is still appended
                match outcome {
                    AsyncOutcome::Fulfilled(tweet)
                        if !env.fencing.admits(&state.fence, TweetsOperation::Create, request_id) =>
                    {
                        tracing::debug!(%request_id, tweet_id = tweet.id, "Appending superseded tweet");
                        state.fence.complete(request_id);
                        state.tweets.push(tweet);
                    },
                    outcome => {
                        if let Some(tweet) =
                            Self::finish(state, env, TweetsOperation::Create, request_id, outcome)
                        {
                            tracing::debug!(tweet_id = tweet.id, "Appending tweet");
                            state.tweets.push(tweet);
                        }
                    },
                }
                smallvec![Effect::None]
            },
        }
    }
}
