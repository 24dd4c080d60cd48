/*
[INPUT]:  Response envelopes returned by the API
[OUTPUT]: Typed envelopes (pagination metadata, OAuth results, public keys)
[POS]:    Data layer - incoming envelope definitions
[UPDATE]: When envelope fields change
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::PublicKey;

/// Listing envelope: the resource array plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(
        default = "Vec::new",
        alias = "users",
        alias = "nodes",
        alias = "trans",
        alias = "subscriptions"
    )]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(
        default,
        alias = "users_count",
        alias = "node_count",
        alias = "nodes_count",
        alias = "trans_count",
        alias = "subscriptions_count"
    )]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

/// Response of `POST /oauth/{user_id}`
///
/// Without `oauth_key` the server is asking for a one-time code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OAuthResponse {
    #[serde(default)]
    pub oauth_key: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_i64_lenient")]
    pub expires_in: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_i64_lenient")]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl OAuthResponse {
    /// Human readable text of a challenge response
    pub fn challenge_message(&self) -> String {
        let from_value = |value: &Value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("en").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };

        self.error
            .as_ref()
            .and_then(from_value)
            .or_else(|| self.message.as_ref().and_then(from_value))
            .unwrap_or_else(|| "one-time code required".to_string())
    }
}

/// Response of `GET /client?issue_public_key=YES`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicKeyEnvelope {
    pub public_key_obj: PublicKey,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// The API sends timestamps both as numbers and as numeric strings
    pub fn deserialize_opt_i64_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => raw
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("invalid timestamp value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserData;
    use serde_json::json;

    #[test]
    fn page_envelope_reads_users_listing() {
        let envelope: PageEnvelope<UserData> = serde_json::from_value(json!({
            "error_code": "0",
            "http_code": "200",
            "limit": 2,
            "page": 1,
            "page_count": 3,
            "success": true,
            "users": [{ "_id": "u1" }, { "_id": "u2" }],
            "users_count": 5
        }))
        .unwrap();

        assert_eq!(envelope.items.len(), 2);
        assert_eq!(envelope.items[1].id, "u2");
        assert_eq!(envelope.page, 1);
        assert_eq!(envelope.page_count, 3);
        assert_eq!(envelope.limit, Some(2));
        assert_eq!(envelope.total, 5);
    }

    #[test]
    fn page_envelope_defaults() {
        let envelope: PageEnvelope<UserData> = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.items.is_empty());
        assert_eq!(envelope.page, 1);
        assert_eq!(envelope.page_count, 0);
        assert_eq!(envelope.total, 0);
    }

    #[test]
    fn oauth_response_with_string_timestamps() {
        let response: OAuthResponse = serde_json::from_value(json!({
            "client_id": "c1",
            "expires_at": "1498297390",
            "expires_in": "7200",
            "oauth_key": "oauth_abc",
            "refresh_token": "refresh_new",
            "scope": ["USER|PATCH"],
            "user_id": "u1"
        }))
        .unwrap();

        assert_eq!(response.oauth_key.as_deref(), Some("oauth_abc"));
        assert_eq!(response.expires_in, Some(7200));
        assert_eq!(response.expires_at, Some(1_498_297_390));
    }

    #[test]
    fn oauth_response_challenge() {
        let response: OAuthResponse = serde_json::from_value(json!({
            "error": { "en": "Fingerprint not registered. Please perform the MFA flow." },
            "error_code": "10",
            "http_code": "202",
            "phone_numbers": ["901.111.1111", "test@synapsefi.com"],
            "success": false
        }))
        .unwrap();

        assert!(response.oauth_key.is_none());
        assert_eq!(response.phone_numbers.len(), 2);
        assert_eq!(
            response.challenge_message(),
            "Fingerprint not registered. Please perform the MFA flow."
        );
    }
}
