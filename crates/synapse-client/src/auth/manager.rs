/*
[INPUT]:  Transport, user id and refresh token
[OUTPUT]: Active OAuth session injected into the shared token store
[POS]:    Auth layer - orchestrates the OAuth challenge/response flow
[UPDATE]: When the oauth endpoint or challenge handling changes
*/

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::http::{ApiPath, HttpClient, Result, SynapseError};
use crate::types::{OAuthRequest, OAuthResponse};

use super::SessionToken;

/// Lifetime assumed when the server reports no expiry
const DEFAULT_EXPIRES_SECONDS: i64 = 2 * 60 * 60;

/// Where the OAuth flow currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    /// A one-time code has been requested; `phone_numbers` lists the devices it can go to
    Pending { phone_numbers: Vec<String> },
    Active(SessionToken),
}

/// Obtains and refreshes the OAuth key for one user
#[derive(Debug)]
pub struct TokenManager {
    http: HttpClient,
    user_id: String,
    refresh_token: String,
    state: TokenState,
}

impl TokenManager {
    pub fn new(http: HttpClient, user_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            http,
            user_id: user_id.into(),
            refresh_token: refresh_token.into(),
            state: TokenState::NoToken,
        }
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Return the active token, refreshing first when there is none or it expired
    pub async fn ensure_token(&mut self) -> Result<SessionToken> {
        if let TokenState::Active(token) = &self.state {
            if !token.is_expired() {
                return Ok(token.clone());
            }
            info!(user_id = %self.user_id, "oauth token expired");
            self.http.tokens().clear();
            self.state = TokenState::Pending {
                phone_numbers: Vec::new(),
            };
        }

        self.refresh(None).await
    }

    /// Request a new OAuth key.
    ///
    /// Pass the one-time code once the server has issued a challenge. Without
    /// one, a challenged account fails with `ChallengeRequired`.
    pub async fn refresh(&mut self, challenge_response: Option<&str>) -> Result<SessionToken> {
        let body = OAuthRequest {
            refresh_token: &self.refresh_token,
            phone_number: None,
            validation_pin: challenge_response,
        };
        let result = self.post_oauth(&body, challenge_response.is_some()).await;
        let response = self.reset_on_auth_failure(result)?;

        let Some(oauth_key) = response.oauth_key.clone() else {
            let message = response.challenge_message();
            self.http.tokens().clear();
            self.state = TokenState::Pending {
                phone_numbers: response.phone_numbers.clone(),
            };

            if challenge_response.is_some() {
                return Err(SynapseError::AuthChallenge { message });
            }
            info!(user_id = %self.user_id, "oauth challenge issued");
            return Err(SynapseError::ChallengeRequired {
                message,
                phone_numbers: response.phone_numbers,
            });
        };

        if let Some(rotated) = response.refresh_token.as_ref() {
            self.refresh_token.clone_from(rotated);
        }

        let token = SessionToken {
            oauth_key,
            refresh_token: self.refresh_token.clone(),
            expires_at: expiry(&response),
        };
        self.http.tokens().set_token(token.clone());
        self.state = TokenState::Active(token.clone());
        info!(user_id = %self.user_id, expires_at = %token.expires_at, "oauth token active");

        Ok(token)
    }

    /// Ask the server to send the one-time code to `phone_number`
    pub async fn select_device(&mut self, phone_number: &str) -> Result<()> {
        let body = OAuthRequest {
            refresh_token: &self.refresh_token,
            phone_number: Some(phone_number),
            validation_pin: None,
        };
        let result = self.post_oauth(&body, false).await;
        let response = self.reset_on_auth_failure(result)?;

        if let TokenState::NoToken = self.state {
            self.state = TokenState::Pending {
                phone_numbers: response.phone_numbers,
            };
        }
        Ok(())
    }

    async fn post_oauth(&self, body: &OAuthRequest<'_>, answered: bool) -> Result<OAuthResponse> {
        let path = ApiPath::OAuth.with_id(&self.user_id);
        let value = self
            .http
            .post(&path, body)
            .await
            .map_err(|err| classify_oauth_error(err, answered))?;
        Ok(serde_json::from_value(value)?)
    }

    fn reset_on_auth_failure(&mut self, result: Result<OAuthResponse>) -> Result<OAuthResponse> {
        if let Err(SynapseError::Auth { .. }) = &result {
            self.http.tokens().clear();
            self.state = TokenState::NoToken;
        }
        result
    }
}

/// Rejected credentials are fatal; a rejected code only fails the challenge
fn classify_oauth_error(err: SynapseError, answered: bool) -> SynapseError {
    match err {
        SynapseError::Api {
            status: 401 | 403,
            message,
            ..
        } => SynapseError::Auth { message },
        SynapseError::Api {
            status: 400..=499,
            message,
            ..
        } if answered => SynapseError::AuthChallenge { message },
        other => other,
    }
}

fn expiry(response: &OAuthResponse) -> DateTime<Utc> {
    if let Some(seconds) = response.expires_in {
        return Utc::now() + Duration::seconds(seconds);
    }
    response
        .expires_at
        .and_then(|at| DateTime::from_timestamp(at, 0))
        .unwrap_or_else(|| Utc::now() + Duration::seconds(DEFAULT_EXPIRES_SECONDS))
}
