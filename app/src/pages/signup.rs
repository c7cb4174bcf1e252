//! Sign-up page model.

use super::{PageContext, Submitted};
use crate::auth::AuthAction;
use crate::router::Route;
use crate::validation::{self, Field, FieldErrors};
use chirp_api::{ChirpApi, SignUpRequest};
use chirp_runtime::StoreError;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay between a successful sign-up and showing the login page
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Message shown after a successful sign-up, until the redirect
pub const SIGNUP_SUCCESS: &str = "Sign up successful!";

/// Sign-up form
#[derive(Debug, Default)]
pub struct SignUpPage {
    name: String,
    email: String,
    password: String,
    errors: FieldErrors,
    success_message: Option<String>,
    submitting: bool,
    redirect: Option<JoinHandle<()>>,
}

impl SignUpPage {
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
            Field::Name => self.name = value.into(),
            Field::Email => self.email = value.into(),
            Field::Password => self.password = value.into(),
            _ => return,
        }
        self.errors.remove(field);
    }

    /// Current name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

    /// Success message, shown until the redirect to login happens
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        let redirected = self.redirect.as_ref().is_some_and(JoinHandle::is_finished);
        self.success_message.as_deref().filter(|_| !redirected)
    }

    /// Whether a submit is waiting on the backend
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Check every field, replacing earlier errors
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.check(Field::Name, validation::required(Field::Name, &self.name));
        errors.check(Field::Email, validation::email(&self.email));
        errors.check(Field::Password, validation::password(Field::Password, &self.password));
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and create the account
    ///
    /// On success the form is cleared, the auth slice is reset and
    /// navigation to the login page is scheduled.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects a dispatch or the
    /// request does not settle in time.
    pub async fn submit<C: ChirpApi + 'static>(&mut self, ctx: &PageContext<C>) -> Result<Submitted, StoreError> {
        if !self.validate() {
            return Ok(Submitted::Invalid);
        }

        let request = SignUpRequest::new(&self.name, &self.email, &self.password);
        self.submitting = true;
        let outcome = ctx
            .request(|request_id| AuthAction::SignUp { request_id, request })
            .await;
        self.submitting = false;

        let outcome = outcome?;
        match &outcome {
            Submitted::Succeeded => {
                tracing::info!(email = %self.email, "Sign up succeeded");
                self.success_message = Some(SIGNUP_SUCCESS.to_string());
                self.errors.clear();
                self.name.clear();
                self.email.clear();
                self.password.clear();
                ctx.store.send(AuthAction::ResetAuthState.into()).await?;
                self.redirect = Some(ctx.router.navigate_after(Route::Login, SIGNUP_REDIRECT_DELAY));
            },
            Submitted::Failed(error) => {
                self.errors.insert(Field::Server, error.display_message());
            },
            Submitted::Invalid | Submitted::Superseded => {},
        }
        Ok(outcome)
    }

    /// Wait until the scheduled navigation has happened, then drop the
    /// success message
    pub async fn wait_for_redirect(&mut self) {
        if let Some(redirect) = self.redirect.take() {
            let _ = redirect.await;
            self.success_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let mut page = SignUpPage::new();
        page.set_field(Field::Email, "user@example.com");
        page.set_field(Field::Password, "secret1");
        assert!(!page.validate());
        assert_eq!(page.errors().get(Field::Name), Some("Name is required"));

        page.set_field(Field::Name, "Ada");
        assert!(page.validate());
    }
}
