//! Request and response bodies exchanged with the backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated user or session object returned by sign-in and sign-up
///
/// The backend payload is kept verbatim, whatever its shape. Accessors look
/// for a field at the top level first, then under a nested `user` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User {
    payload: Value,
}

impl User {
    /// A user with only an email
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("email".to_string(), Value::String(email.into()));
        Self {
            payload: Value::Object(fields),
        }
    }

    /// Wrap a payload as received
    #[must_use]
    pub const fn from_payload(payload: Value) -> Self {
        Self { payload }
    }

    /// The payload as received
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Account email when the backend sent one
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.field("email")
    }

    /// Display name when the backend sent one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field("name")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.payload
            .get(key)
            .or_else(|| self.payload.get("user").and_then(|user| user.get(key)))
            .and_then(Value::as_str)
    }
}

/// A posted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    /// Tweet id
    pub id: i64,
    /// Message text
    pub content: String,
    /// Author id
    pub user_id: i64,
    /// Ids of the users the tweet is shared with
    #[serde(default)]
    pub shared_with: Vec<i64>,
}

/// `POST /auth/signup` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Password
    pub password: String,
}

impl SignUpRequest {
    /// Build a sign-up request
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// `POST /auth/signin` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Account email
    pub email: String,
    /// Password
    pub password: String,
}

impl SignInRequest {
    /// Build a sign-in request
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// `PATCH /auth/changepassword` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Password currently in use
    pub current_password: String,
    /// Replacement password
    pub new_password: String,
}

impl ChangePasswordRequest {
    /// Build a change-password request
    #[must_use]
    pub fn new(current_password: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }
}

/// `POST /tweets` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTweet {
    /// Message text
    pub content: String,
    /// Ids of the users to share with
    pub users: Vec<i64>,
}

impl NewTweet {
    /// Build a new tweet
    #[must_use]
    pub fn new(content: impl Into<String>, users: Vec<i64>) -> Self {
        Self {
            content: content.into(),
            users,
        }
    }
}
