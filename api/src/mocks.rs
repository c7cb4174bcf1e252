//! Scripted in-memory backend for testing.
//!
//! Each endpoint has a queue of scripted replies, consumed one per call in
//! order. A reply may carry a delay so tests can control the order in which
//! concurrent calls complete. Calls without a scripted reply fail with
//! [`ApiError::Unexpected`].

use crate::endpoints::ChirpApi;
use crate::error::ApiError;
use crate::types::{ChangePasswordRequest, NewTweet, SignInRequest, SignUpRequest, Tweet, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Backend operation a reply is scripted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /auth/signup`
    SignUp,
    /// `POST /auth/signin`
    SignIn,
    /// `PATCH /auth/changepassword`
    ChangePassword,
    /// Tweet listing
    FetchTweets,
    /// `POST /tweets`
    CreateTweet,
}

/// One recorded call with its JSON request body (`null` when there is none)
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation called
    pub endpoint: Endpoint,
    /// Request body as sent
    pub body: Value,
}

#[derive(Debug)]
struct Reply {
    delay: Duration,
    result: Result<Value, ApiError>,
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<Endpoint, VecDeque<Reply>>,
    calls: Vec<RecordedCall>,
}

/// Scripted [`ChirpApi`] implementation
#[derive(Debug, Clone, Default)]
pub struct MockChirpApi {
    state: Arc<Mutex<MockState>>,
}

impl MockChirpApi {
    /// Create a mock with no scripted replies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    ///
    /// `payload` is serialized to JSON and decoded into the endpoint's
    /// response type when the call happens.
    #[must_use]
    pub fn respond(self, endpoint: Endpoint, payload: impl Serialize) -> Self {
        self.respond_after(endpoint, Duration::ZERO, payload)
    }

    /// Queue a successful reply delivered after `delay`
    #[must_use]
    pub fn respond_after(self, endpoint: Endpoint, delay: Duration, payload: impl Serialize) -> Self {
        let result = serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()));
        self.push(endpoint, Reply { delay, result })
    }

    /// Queue a failure
    #[must_use]
    pub fn fail(self, endpoint: Endpoint, error: ApiError) -> Self {
        self.fail_after(endpoint, Duration::ZERO, error)
    }

    /// Queue a failure delivered after `delay`
    #[must_use]
    pub fn fail_after(self, endpoint: Endpoint, delay: Duration, error: ApiError) -> Self {
        self.push(
            endpoint,
            Reply {
                delay,
                result: Err(error),
            },
        )
    }

    /// Queue a server rejection with the given status and JSON body
    #[must_use]
    pub fn reject(self, endpoint: Endpoint, status: u16, body: Value) -> Self {
        self.fail(endpoint, ApiError::ServerRejection { status, body })
    }

    /// All calls made so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of calls made to one endpoint
    #[must_use]
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    fn push(self, endpoint: Endpoint, reply: Reply) -> Self {
        self.lock().replies.entry(endpoint).or_default().push_back(reply);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Value,
    ) -> impl Future<Output = Result<T, ApiError>> + Send + use<T> {
        let reply = {
            let mut state = self.lock();
            state.calls.push(RecordedCall { endpoint, body });
            state.replies.get_mut(&endpoint).and_then(VecDeque::pop_front)
        };

        async move {
            let Some(reply) = reply else {
                return Err(ApiError::Unexpected(format!(
                    "no scripted reply for {endpoint:?}"
                )));
            };
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            let value = reply.result?;
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
        }
    }
}

fn body_of(request: &impl Serialize) -> Value {
    serde_json::to_value(request).unwrap_or(Value::Null)
}

impl ChirpApi for MockChirpApi {
    fn sign_up(&self, request: SignUpRequest) -> impl Future<Output = Result<User, ApiError>> + Send {
        self.call(Endpoint::SignUp, body_of(&request))
    }

    fn sign_in(&self, request: SignInRequest) -> impl Future<Output = Result<User, ApiError>> + Send {
        self.call(Endpoint::SignIn, body_of(&request))
    }

    fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send {
        self.call(Endpoint::ChangePassword, body_of(&request))
    }

    fn fetch_tweets(&self) -> impl Future<Output = Result<Vec<Tweet>, ApiError>> + Send {
        self.call(Endpoint::FetchTweets, Value::Null)
    }

    fn create_tweet(&self, request: NewTweet) -> impl Future<Output = Result<Tweet, ApiError>> + Send {
        self.call(Endpoint::CreateTweet, body_of(&request))
    }
}
