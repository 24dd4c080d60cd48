/*
[INPUT]:  Error sources (transport, API responses, JSON decoding, OAuth flow)
[OUTPUT]: Structured error types carrying server status and message intact
[POS]:    Error handling layer - unified error type for entire crate
[UPDATE]: When adding new error sources or changing the OAuth failure mapping
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Synapse client
#[derive(Error, Debug)]
pub enum SynapseError {
    /// Network or connection failure; never retried
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// API returned a non-2xx response
    #[error("API error (status {status}, code {code:?}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Refresh token or client credentials were rejected
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The one-time code supplied for a challenge was rejected
    #[error("Challenge answer rejected: {message}")]
    AuthChallenge { message: String },

    /// The server wants an out-of-band one-time code before issuing a token
    #[error("Challenge required: {message}")]
    ChallengeRequired {
        message: String,
        phone_numbers: Vec<String>,
    },

    /// Path does not start with any known API prefix
    #[error("Invalid API path: {0}")]
    InvalidPath(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SynapseError {
    /// Check if error indicates an authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            SynapseError::Auth { .. }
                | SynapseError::AuthChallenge { .. }
                | SynapseError::ChallengeRequired { .. }
        )
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            SynapseError::Api { status, .. } => Some(*status),
            SynapseError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from status code, server error code and message
    pub fn api_error(
        status: StatusCode,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        SynapseError::Api {
            status: status.as_u16(),
            code,
            message: message.into(),
        }
    }

    /// Build an API error from a raw error response body.
    ///
    /// The server reports `{"error": {"en": "..."}, "error_code": "..."}`;
    /// bodies that are not JSON keep their raw text as the message.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let Some(value) = parsed else {
            return Self::api_error(status, None, body.trim());
        };

        let code = value.get("error_code").and_then(|code| match code {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let message = value
            .get("error")
            .and_then(|err| match err {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Object(map) => {
                    map.get("en").and_then(|en| en.as_str()).map(str::to_string)
                }
                _ => None,
            })
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string());

        Self::api_error(status, code, message)
    }
}

/// Result type alias for Synapse operations
pub type Result<T> = std::result::Result<T, SynapseError>;
