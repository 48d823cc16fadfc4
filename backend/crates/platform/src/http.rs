//! HTTP client infrastructure for external services
//!
//! Shared reqwest client construction and error-body decoding for the
//! services this application talks to over HTTP (identity provider,
//! object storage).

use std::time::Duration;

/// Default timeout for a single call to an external service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Error constructing or using the shared service client
#[derive(Debug, thiserror::Error)]
pub enum ServiceClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Build the reqwest client used for server-to-service calls.
///
/// No cookie store: server-side calls authenticate with bearer tokens or
/// API keys, never with ambient cookies.
pub fn service_client() -> Result<reqwest::Client, ServiceClientError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(ServiceClientError::Build)
}

/// Pull a human-readable message out of an external service's error body.
///
/// The services we integrate with disagree on the field name, so try the
/// common ones and fall back to the raw body.
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "message", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown upstream error".to_string()
    } else {
        trimmed.to_string()
    }
}
