//! Login page model.

use super::{PageContext, Submitted};
use crate::auth::AuthAction;
use crate::router::Route;
use crate::validation::{self, Field, FieldErrors};
use chirp_api::{ChirpApi, SignInRequest};
use chirp_runtime::StoreError;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay between a successful login and showing the tweets page
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Message shown after a successful login
pub const LOGIN_SUCCESS: &str = "Login successful!";

/// Login form
#[derive(Debug, Default)]
pub struct LoginPage {
    email: String,
    password: String,
    errors: FieldErrors,
    success_message: Option<String>,
    submitting: bool,
    redirect: Option<JoinHandle<()>>,
}

impl LoginPage {
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
            Field::Email => self.email = value.into(),
            Field::Password => self.password = value.into(),
            _ => return,
        }
        self.errors.remove(field);
    }

    /// Current email
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Field errors
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Success message, once logged in
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Whether a submit is waiting on the backend
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Check every field, replacing earlier errors
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.check(Field::Email, validation::email(&self.email));
        errors.check(Field::Password, validation::password(Field::Password, &self.password));
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate, sign in and schedule navigation to the tweets page
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects the dispatch or the
    /// request does not settle in time.
    pub async fn submit<C: ChirpApi + 'static>(&mut self, ctx: &PageContext<C>) -> Result<Submitted, StoreError> {
        if !self.validate() {
            return Ok(Submitted::Invalid);
        }

        let request = SignInRequest::new(&self.email, &self.password);
        self.submitting = true;
        let outcome = ctx
            .request(|request_id| AuthAction::SignIn { request_id, request })
            .await;
        self.submitting = false;

        let outcome = outcome?;
        match &outcome {
            Submitted::Succeeded => {
                tracing::info!(email = %self.email, "Login succeeded");
                self.success_message = Some(LOGIN_SUCCESS.to_string());
                self.errors.clear();
                self.redirect = Some(ctx.router.navigate_after(Route::Tweets, LOGIN_REDIRECT_DELAY));
            },
            Submitted::Failed(error) => {
                self.errors.insert(Field::Server, error.display_message());
            },
            Submitted::Invalid | Submitted::Superseded => {},
        }
        Ok(outcome)
    }

    /// Wait until the scheduled navigation has happened
    pub async fn wait_for_redirect(&mut self) {
        if let Some(redirect) = self.redirect.take() {
            let _ = redirect.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        let mut page = LoginPage::new();
        assert!(!page.validate());
        assert_eq!(page.errors().get(Field::Email), Some("Email is required"));
        assert_eq!(page.errors().get(Field::Password), Some("Password is required"));

        page.set_field(Field::Email, "notanemail");
        page.set_field(Field::Password, "12345");
        assert!(!page.validate());
        assert_eq!(page.errors().get(Field::Email), Some("Email is invalid"));
        assert_eq!(
            page.errors().get(Field::Password),
            Some("Password must be at least 6 characters")
        );

        page.set_field(Field::Email, "user@example.com");
        assert_eq!(page.errors().get(Field::Email), None);
        page.set_field(Field::Password, "123456");
        assert!(page.validate());
    }

    #[test]
    fn foreign_fields_are_ignored() {
        let mut page = LoginPage::new();
        assert!(!page.validate());
        page.set_field(Field::Content, "hello");
        assert_eq!(page.errors().get(Field::Email), Some("Email is required"));
    }
}
