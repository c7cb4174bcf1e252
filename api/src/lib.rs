//! # Chirp API Client
//!
//! HTTP client adapter for the Chirp micro-posting backend.
//!
//! - [`ApiClient`]: one `reqwest` client bound to a base URL; every network
//!   call in the application goes through it
//! - [`ChirpApi`]: the typed backend contract (sign up, sign in, change
//!   password, fetch tweets, create tweet), implemented over HTTP by
//!   [`HttpChirpApi`]
//! - [`ApiError`]: separates "the server answered with a failure status" from
//!   "no response was received"
//!
//! Calls are exactly-once best effort: no retry, no caching, and no timeout
//! unless one is configured.
//!
//! ## Example
//!
//! ```no_run
//! use chirp_api::{ApiConfig, ChirpApi, HttpChirpApi, SignInRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpChirpApi::new(ApiConfig::from_env())?;
//!
//!     let user = api
//!         .sign_in(SignInRequest::new("user@example.com", "hunter22"))
//!         .await?;
//!     println!("signed in as {}", user.email().unwrap_or("unknown"));
//!
//!     for tweet in api.fetch_tweets().await? {
//!         println!("{}: {}", tweet.id, tweet.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use client::ApiClient;
pub use config::{ApiConfig, FetchTweetsMethod, DEFAULT_BASE_URL};
pub use endpoints::{ChirpApi, HttpChirpApi};
pub use error::ApiError;
pub use reqwest::Method;
pub use types::{ChangePasswordRequest, NewTweet, SignInRequest, SignUpRequest, Tweet, User};
