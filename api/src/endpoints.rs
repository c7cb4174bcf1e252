//! Typed backend contract
//!
//! [`ChirpApi`] is the seam the state slices depend on. [`HttpChirpApi`]
//! implements it over [`ApiClient`]; tests use
//! [`MockChirpApi`](crate::mocks::MockChirpApi).

use crate::client::ApiClient;
use crate::config::{ApiConfig, FetchTweetsMethod};
use crate::error::ApiError;
use crate::types::{ChangePasswordRequest, NewTweet, SignInRequest, SignUpRequest, Tweet, User};
use reqwest::Method;
use serde_json::Value;
use std::future::Future;

/// `POST` account creation
pub const SIGN_UP_PATH: &str = "/auth/signup";
/// `POST` authentication
pub const SIGN_IN_PATH: &str = "/auth/signin";
/// `PATCH` password change
pub const CHANGE_PASSWORD_PATH: &str = "/auth/changepassword";
/// Tweet listing and creation
pub const TWEETS_PATH: &str = "/tweets";

/// Operations the Chirp backend offers
pub trait ChirpApi: Send + Sync {
    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or when no response arrives.
    fn sign_up(&self, request: SignUpRequest) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Authenticate
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or when no response arrives.
    fn sign_in(&self, request: SignInRequest) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Change the current user's password; the success body is opaque
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or when no response arrives.
    fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// List all tweets visible to the caller
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or when no response arrives.
    fn fetch_tweets(&self) -> impl Future<Output = Result<Vec<Tweet>, ApiError>> + Send;

    /// Post a tweet shared with the given user ids
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or when no response arrives.
    fn create_tweet(&self, request: NewTweet) -> impl Future<Output = Result<Tweet, ApiError>> + Send;
}

/// [`ChirpApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpChirpApi {
    client: ApiClient,
    fetch_tweets_method: FetchTweetsMethod,
}

impl HttpChirpApi {
    /// Build from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(&config)?,
            fetch_tweets_method: config.fetch_tweets_method,
        })
    }

    /// The underlying client
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl ChirpApi for HttpChirpApi {
    fn sign_up(&self, request: SignUpRequest) -> impl Future<Output = Result<User, ApiError>> + Send {
        async move { self.client.request(Method::POST, SIGN_UP_PATH, Some(&request)).await }
    }

    fn sign_in(&self, request: SignInRequest) -> impl Future<Output = Result<User, ApiError>> + Send {
        async move { self.client.request(Method::POST, SIGN_IN_PATH, Some(&request)).await }
    }

    fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send {
        async move {
            self.client
                .request(Method::PATCH, CHANGE_PASSWORD_PATH, Some(&request))
                .await
        }
    }

    fn fetch_tweets(&self) -> impl Future<Output = Result<Vec<Tweet>, ApiError>> + Send {
        let method = self.fetch_tweets_method.method();
        async move { self.client.request::<_, Value>(method, TWEETS_PATH, None).await }
    }

    fn create_tweet(&self, request: NewTweet) -> impl Future<Output = Result<Tweet, ApiError>> + Send {
        async move { self.client.request(Method::POST, TWEETS_PATH, Some(&request)).await }
    }
}
