/*
[INPUT]:  API resource documents (users, nodes, transactions, subscriptions)
[OUTPUT]: Typed resource records with a bag for fields we do not model
[POS]:    Data layer - parsed resource payloads behind the wrappers
[UPDATE]: When the server adds fields worth promoting out of `other`
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::segment;

/// Login entry on a user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub logins: Vec<Login>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub legal_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default)]
    pub documents: Vec<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<String>,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: f64,
    pub currency: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_status: Option<TransactionStatus>,
    #[serde(default)]
    pub timeline: Vec<TransactionStatus>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl TransactionData {
    /// `/users/{user}/nodes/{node}` of the sending node, when `from` carries it
    pub fn sender_node_path(&self) -> Option<String> {
        let from = self.from.as_ref()?;
        let node_id = from.get("id")?.as_str()?;
        let user_id = from.get("user")?.get("_id")?.as_str()?;
        Some(format!(
            "/users/{}/nodes/{}",
            segment(user_id),
            segment(node_id)
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionData {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `public_key_obj` returned when issuing a public key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    pub public_key: String,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}
