//! Client configuration loaded from environment variables

use std::env;
use std::time::Duration;

/// Base URL used when `API_BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// HTTP verb used to list tweets
///
/// The backend has historically listed tweets with `POST /tweets`; `GET` is
/// the default and `POST` is kept for deployments that still expect it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchTweetsMethod {
    /// `GET /tweets`
    #[default]
    Get,
    /// `POST /tweets` with an empty body
    Post,
}

impl FetchTweetsMethod {
    /// Parse `get` or `post`, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            _ => None,
        }
    }

    /// The corresponding HTTP method
    #[must_use]
    pub fn method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Verb used by the fetch-tweets endpoint
    pub fetch_tweets_method: FetchTweetsMethod,
}

impl ApiConfig {
    /// Configuration for an explicit base URL with defaults for the rest
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            fetch_tweets_method: FetchTweetsMethod::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `API_BASE_URL` (default [`DEFAULT_BASE_URL`])
    /// - `API_TIMEOUT_SECS` (unset or unparsable: no timeout)
    /// - `TWEETS_FETCH_METHOD` (`get` or `post`, default `get`)
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let fetch_tweets_method = env::var("TWEETS_FETCH_METHOD")
            .ok()
            .and_then(|method| FetchTweetsMethod::parse(&method))
            .unwrap_or_default();

        Self {
            base_url,
            timeout,
            fetch_tweets_method,
        }
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the fetch-tweets verb
    #[must_use]
    pub const fn with_fetch_tweets_method(mut self, method: FetchTweetsMethod) -> Self {
        self.fetch_tweets_method = method;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
