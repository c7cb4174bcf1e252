//! Create-tweet page model.

use super::{tweets_status, FormStatus, PageContext, Submitted};
use crate::app::AppState;
use crate::tweets::TweetsAction;
use crate::users::UsersState;
use crate::validation::{self, Field, FieldErrors};
use chirp_api::{ChirpApi, NewTweet};
use chirp_runtime::StoreError;

/// Message shown after a tweet was posted
pub const TWEET_POSTED: &str = "Tweet posted!";

/// Create-tweet form
///
/// Share targets are entered as comma-separated user ids.
#[derive(Debug, Default)]
pub struct CreateTweetPage {
    content: String,
    share_with: String,
    errors: FieldErrors,
    success_message: Option<String>,
    submitting: bool,
}

impl CreateTweetPage {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit a field; clears that field's error
    ///
    /// Fields not on this form are ignored.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Content => self.content = value.into(),
            Field::Users => self.share_with = value.into(),
            _ => return,
        }
        self.errors.remove(field);
    }

    /// Field errors
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Success message, once posted
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Whether a submit is waiting on the backend
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Loading and error feedback from the tweets slice
    #[must_use]
    pub fn status(state: &AppState) -> FormStatus {
        tweets_status(state)
    }

    /// Labels for the entered share targets, by name when known
    ///
    /// Unparsable input yields no labels.
    #[must_use]
    pub fn share_targets(&self, users: &UsersState) -> Vec<String> {
        validation::user_ids(&self.share_with)
            .map(|ids| ids.into_iter().map(|id| users.label(id)).collect())
            .unwrap_or_default()
    }

    /// Check every field, replacing earlier errors
    ///
    /// Returns the tweet to post when the form is valid.
    pub fn validate(&mut self) -> Option<NewTweet> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Content, validation::required(Field::Content, &self.content));
        let users = match validation::user_ids(&self.share_with) {
            Ok(users) => Some(users),
            Err(message) => {
                errors.insert(Field::Users, message);
                None
            },
        };
        self.errors = errors;

        match users {
            Some(users) if self.errors.is_empty() => Some(NewTweet::new(&self.content, users)),
            _ => None,
        }
    }

    /// Validate and post the tweet
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects the dispatch or the
    /// request does not settle in time.
    pub async fn submit<C: ChirpApi + 'static>(&mut self, ctx: &PageContext<C>) -> Result<Submitted, StoreError> {
        self.success_message = None;
        let Some(tweet) = self.validate() else {
            return Ok(Submitted::Invalid);
        };

        self.submitting = true;
        let outcome = ctx
            .request(|request_id| TweetsAction::CreateTweet { request_id, tweet })
            .await;
        self.submitting = false;

        let outcome = outcome?;
        if outcome.is_success() {
            self.success_message = Some(TWEET_POSTED.to_string());
            self.content.clear();
            self.share_with.clear();
        }
        Ok(outcome)
    }
}
