//! HTTP client adapter
//!
//! Every network call goes through [`ApiClient::request`]: it builds the URL
//! from the configured base, sends an optional JSON body and classifies the
//! outcome into success, server rejection or no response.

use crate::config::ApiConfig;
use crate::error::ApiError;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Chirp backend HTTP client
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the underlying HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request and decode the JSON response
    ///
    /// An empty 2xx body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::ServerRejection`] for a non-2xx status, carrying the body
    /// - [`ApiError::Unexpected`] when no response was received
    /// - [`ApiError::Decode`] when a 2xx body does not match `T`
    #[tracing::instrument(skip(self, body), fields(url = %self.url(path)))]
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "No response received");
            ApiError::Unexpected(e.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Server rejected request");
            return Err(ApiError::ServerRejection {
                status: status.as_u16(),
                body: parse_body(&bytes),
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "Request succeeded");

        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?
        };
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Parse a rejection body as JSON, falling back to a JSON string of its text
fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::new(&ApiConfig::new("http://localhost:8000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/auth/signin"), "http://localhost:8000/api/auth/signin");
        assert_eq!(client.url("tweets"), "http://localhost:8000/api/tweets");
    }

    #[test]
    fn rejection_body_falls_back_to_text() {
        assert_eq!(parse_body(br#"{"message":"nope"}"#), json!({"message": "nope"}));
        assert_eq!(parse_body(b"Bad Gateway"), json!("Bad Gateway"));
        assert_eq!(parse_body(b""), json!(""));
    }
}
