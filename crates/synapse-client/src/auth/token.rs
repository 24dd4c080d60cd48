/*
[INPUT]:  OAuth keys, refresh tokens and expiration timestamps
[OUTPUT]: Shared token retrieval and expiration status
[POS]:    Auth layer - session token storage read by the transport
[UPDATE]: When changing token fields or storage strategy
*/

use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// Stored OAuth session with metadata
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub oauth_key: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("oauth_key", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Session token shared between the token manager and every transport clone
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    data: Arc<RwLock<Option<SessionToken>>>,
}

impl TokenStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new token
    pub fn set_token(&self, token: SessionToken) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token);
    }

    /// OAuth key to send, if a token is held
    pub fn oauth_key(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.oauth_key.clone())
    }

    /// Check if token is expired; an empty store counts as expired
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(data) => data.is_expired(),
            None => true,
        }
    }

    pub fn token(&self) -> Option<SessionToken> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
