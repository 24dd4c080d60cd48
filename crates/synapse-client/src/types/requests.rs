/*
[INPUT]:  Caller options for each API call
[OUTPUT]: Request bodies and query strings with unset fields omitted
[POS]:    Data layer - outgoing payload definitions
[UPDATE]: When an endpoint gains recognized options
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination and search options for listing calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Free-text filter, passed through unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// `full_dehydrate` query flag; only sent when requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DehydrateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_dehydrate: Option<&'static str>,
}

impl DehydrateQuery {
    pub fn new(full_dehydrate: bool) -> Self {
        Self {
            full_dehydrate: full_dehydrate.then_some("yes"),
        }
    }
}

/// Body for `POST /oauth/{user_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthRequest<'a> {
    pub refresh_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_pin: Option<&'a str>,
}

/// Login entry of a new user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Body for `POST /users`
///
/// Anything beyond the required fields (documents, extra, ...) goes in `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub logins: Vec<LoginRequest>,
    pub phone_numbers: Vec<String>,
    pub legal_names: Vec<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>, phone_number: impl Into<String>, legal_name: impl Into<String>) -> Self {
        Self {
            logins: vec![LoginRequest {
                email: email.into(),
                password: None,
                scope: None,
            }],
            phone_numbers: vec![phone_number.into()],
            legal_names: vec![legal_name.into()],
            other: Map::new(),
        }
    }
}

/// Body for `POST /subscriptions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub url: String,
    pub scope: Vec<String>,
}

/// Recognized fields for `PATCH /subscriptions/{id}`
///
/// Only these three keys can ever reach the payload; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSubscriptionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
}

impl UpdateSubscriptionOptions {
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.url.is_none() && self.scope.is_none()
    }
}

/// Query for `GET /client` when issuing a public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyQuery {
    pub issue_public_key: &'static str,
    pub scope: String,
}

impl PublicKeyQuery {
    pub fn new<S: AsRef<str>>(issue: bool, scope: &[S]) -> Self {
        Self {
            issue_public_key: if issue { "YES" } else { "NO" },
            scope: scope
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Body for adding documents to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddDocumentsRequest {
    pub documents: Vec<Value>,
}

/// Body for verifying a node with micro-deposit amounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicroDepositRequest<'a> {
    pub micro: &'a [f64],
}

/// Body for commenting on a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRequest<'a> {
    pub comment: &'a str,
}
