//! Change-password page model.

use super::{auth_status, FormStatus, PageContext, Submitted};
use crate::app::AppState;
use crate::auth::AuthAction;
use crate::validation::{self, Field, FieldErrors};
use chirp_api::{ChangePasswordRequest, ChirpApi};
use chirp_runtime::StoreError;

/// Message shown after the password was changed
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";

/// Change-password form
#[derive(Debug, Default)]
pub struct ChangePasswordPage {
    current_password: String,
    new_password: String,
    errors: FieldErrors,
    success_message: Option<String>,
    submitting: bool,
}

impl ChangePasswordPage {
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
            Field::CurrentPassword => self.current_password = value.into(),
            Field::NewPassword => self.new_password = value.into(),
            _ => return,
        }
        self.errors.remove(field);
    }

    /// Field errors
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Success message, once changed
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Whether a submit is waiting on the backend
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Loading and error feedback from the auth slice
    #[must_use]
    pub fn status(state: &AppState) -> FormStatus {
        auth_status(state)
    }

    /// Check every field, replacing earlier errors
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.check(
            Field::CurrentPassword,
            validation::required(Field::CurrentPassword, &self.current_password),
        );
        errors.check(
            Field::NewPassword,
            validation::password(Field::NewPassword, &self.new_password),
        );
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and change the password
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects the dispatch or the
    /// request does not settle in time.
    pub async fn submit<C: ChirpApi + 'static>(&mut self, ctx: &PageContext<C>) -> Result<Submitted, StoreError> {
        self.success_message = None;
        if !self.validate() {
            return Ok(Submitted::Invalid);
        }

        let request = ChangePasswordRequest::new(&self.current_password, &self.new_password);
        self.submitting = true;
        let outcome = ctx
            .request(|request_id| AuthAction::ChangePassword { request_id, request })
            .await;
        self.submitting = false;

        let outcome = outcome?;
        match &outcome {
            Submitted::Succeeded => {
                self.success_message = Some(PASSWORD_CHANGED.to_string());
                self.errors.clear();
                self.current_password.clear();
                self.new_password.clear();
            },
            Submitted::Failed(error) => {
                self.errors.insert(Field::Server, error.display_message());
            },
            Submitted::Invalid | Submitted::Superseded => {},
        }
        Ok(outcome)
    }
}
