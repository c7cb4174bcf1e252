//! Tweet list page model.

use super::{tweets_status, FormStatus, PageContext, Submitted};
use crate::app::AppState;
use crate::tweets::TweetsAction;
use chirp_api::{ChirpApi, Tweet};
use chirp_runtime::StoreError;

/// Tweet list; loads on open
#[derive(Debug, Default)]
pub struct ViewTweetsPage {
    loaded: bool,
}

impl ViewTweetsPage {
    /// Page that has not loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch has settled since the page opened
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch the list and wait for it to settle
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects the dispatch or the
    /// request does not settle in time.
    pub async fn open<C: ChirpApi + 'static>(&mut self, ctx: &PageContext<C>) -> Result<Submitted, StoreError> {
        let outcome = ctx
            .request(|request_id| TweetsAction::FetchTweets { request_id })
            .await?;
        self.loaded = true;
        Ok(outcome)
    }

    /// Tweets to show
    #[must_use]
    pub fn tweets(state: &AppState) -> &[Tweet] {
        &state.tweets.tweets
    }

    /// Loading and error feedback from the tweets slice
    #[must_use]
    pub fn status(state: &AppState) -> FormStatus {
        tweets_status(state)
    }
}
