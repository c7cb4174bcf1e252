//! Form field validation shared by the page models.
//!
//! Validation failures stay inside the page that produced them; nothing here
//! touches the store.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

/// Form fields that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Display name
    Name,
    /// Account email
    Email,
    /// Password
    Password,
    /// Current password on the change-password form
    CurrentPassword,
    /// Replacement password on the change-password form
    NewPassword,
    /// Tweet text
    Content,
    /// Share-with user ids
    Users,
    /// Error reported by the backend for the whole form
    Server,
}

impl Field {
    /// Human label used in messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::CurrentPassword => "Current password",
            Self::NewPassword => "New password",
            Self::Content => "Content",
            Self::Users => "User IDs",
            Self::Server => "Server",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field error messages of one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// No errors
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record `message` for `field` when present
    pub fn check(&mut self, field: Field, message: Option<String>) {
        if let Some(message) = message {
            self.0.insert(field, message);
        }
    }

    /// Record an error, replacing any earlier one for the field
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Error for a field
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the error for a field
    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Drop every error
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether the form is free of errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Whether `value` looks like an email address (`\S+@\S+\.\S+`)
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(value))
}

/// `"<Field> is required"` for an empty value
#[must_use]
pub fn required(field: Field, value: &str) -> Option<String> {
    value.is_empty().then(|| format!("{} is required", field.label()))
}

/// Email rule: required, then format
#[must_use]
pub fn email(value: &str) -> Option<String> {
    required(Field::Email, value)
        .or_else(|| (!is_valid_email(value)).then(|| "Email is invalid".to_string()))
}

/// Password rule for `field`: required, then minimum length
#[must_use]
pub fn password(field: Field, value: &str) -> Option<String> {
    required(field, value).or_else(|| {
        (value.chars().count() < MIN_PASSWORD_LEN)
            .then(|| format!("Password must be at least {MIN_PASSWORD_LEN} characters"))
    })
}

/// Parse a comma-separated list of user ids
///
/// Blank input is an empty list; blank entries are skipped.
///
/// # Errors
///
/// Returns the message to show when an entry is not an integer.
pub fn user_ids(value: &str) -> Result<Vec<i64>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<i64>()
                .map_err(|_| format!("User IDs must be comma-separated numbers, got \"{entry}\""))
        })
        .collect()
}
