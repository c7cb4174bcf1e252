//! Configuration management for the Chirp client.
//!
//! Loads configuration from environment variables with literal fallbacks.

use chirp_api::ApiConfig;
use chirp_core::FencingPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default bound on how long a page waits for its request to settle
pub const DEFAULT_REQUEST_WAIT: Duration = Duration::from_secs(30);

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "chirp=info";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend client configuration
    pub api: ApiConfig,
    /// How completions of superseded requests are treated
    pub fencing: FencingPolicy,
    /// How long a page waits for its request to settle
    pub request_wait: Duration,
    /// Tracing filter directive
    pub log_filter: String,
    /// JSON file listing known users, loaded into the users slice
    pub users_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `API_BASE_URL`, `API_TIMEOUT_SECS`, `TWEETS_FETCH_METHOD`: see
    ///   [`ApiConfig::from_env`]
    /// - `REQUEST_FENCING`: `latest` (default) or `last-writer-wins`
    /// - `REQUEST_WAIT_SECS`: default 30
    /// - `RUST_LOG`: default `chirp=info`
    /// - `USERS_FILE`: optional path to a JSON array of user profiles
    #[must_use]
    pub fn from_env() -> Self {
        let fencing = env::var("REQUEST_FENCING")
            .ok()
            .and_then(|value| {
                let policy = FencingPolicy::parse(&value);
                if policy.is_none() {
                    tracing::warn!(%value, "Unknown REQUEST_FENCING value, using latest-only");
                }
                policy
            })
            .unwrap_or_default();

        let request_wait = env::var("REQUEST_WAIT_SECS")
            .ok()
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_REQUEST_WAIT, Duration::from_secs);

        Self {
            api: ApiConfig::from_env(),
            fencing,
            request_wait,
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            users_file: env::var_os("USERS_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            fencing: FencingPolicy::default(),
            request_wait: DEFAULT_REQUEST_WAIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            users_file: None,
        }
    }
}
