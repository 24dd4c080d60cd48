/*
[INPUT]:  Transaction records, owning node path and the transport
[OUTPUT]: Transaction accessors plus comment and cancel calls
[POS]:    Resource layer - transaction wrapper
[UPDATE]: When adding transaction-scoped endpoints
*/

use serde_json::{Map, Value};

use crate::http::{HttpClient, Result, SynapseError, segment};
use crate::types::{Amount, CommentRequest, TransactionData, TransactionStatus};

use super::Resource;

#[derive(Debug, Clone)]
pub struct Transaction {
    data: TransactionData,
    http: HttpClient,
    node_path: Option<String>,
}

impl Resource for Transaction {
    type Data = TransactionData;

    fn from_data(data: TransactionData, http: HttpClient) -> Self {
        let node_path = data.sender_node_path();
        Self {
            data,
            http,
            node_path,
        }
    }
}

impl Transaction {
    /// Wrap a transaction fetched under a known node
    pub(crate) fn from_node_value(value: Value, http: HttpClient, node_path: String) -> Result<Self> {
        let mut trans = <Self as Resource>::from_value(value, http)?;
        trans.node_path = Some(node_path);
        Ok(trans)
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn amount(&self) -> Option<&Amount> {
        self.data.amount.as_ref()
    }

    pub fn from_node(&self) -> Option<&Value> {
        self.data.from.as_ref()
    }

    pub fn to_node(&self) -> Option<&Value> {
        self.data.to.as_ref()
    }

    pub fn recent_status(&self) -> Option<&TransactionStatus> {
        self.data.recent_status.as_ref()
    }

    /// Shorthand for `recent_status.status`
    pub fn status(&self) -> Option<&str> {
        self.recent_status().map(|s| s.status.as_str())
    }

    pub fn timeline(&self) -> &[TransactionStatus] {
        &self.data.timeline
    }

    pub fn other(&self) -> &Map<String, Value> {
        &self.data.other
    }

    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    /// Node the transaction is addressed under, if known
    pub fn node_path(&self) -> Option<&str> {
        self.node_path.as_deref()
    }

    fn path(&self) -> Result<String> {
        let node_path = self.node_path.as_deref().ok_or_else(|| {
            SynapseError::Config(format!("transaction {} has no node context", self.id()))
        })?;
        Ok(format!("{node_path}/trans/{}", segment(&self.data.id)))
    }

    /// PATCH /users/{user_id}/nodes/{node_id}/trans/{trans_id}
    pub async fn comment(&self, comment: &str) -> Result<Transaction> {
        let path = self.path()?;
        let value = self.http.patch(&path, &CommentRequest { comment }).await?;
        self.rewrap(value)
    }

    /// Cancel the transaction; the server returns it with a canceled status
    ///
    /// DELETE /users/{user_id}/nodes/{node_id}/trans/{trans_id}
    pub async fn cancel(&self) -> Result<Transaction> {
        let path = self.path()?;
        let value = self.http.delete(&path).await?;
        self.rewrap(value)
    }

    fn rewrap(&self, value: Value) -> Result<Transaction> {
        let mut trans = <Self as Resource>::from_value(value, self.http.clone())?;
        if trans.node_path.is_none() {
            trans.node_path = self.node_path.clone();
        }
        Ok(trans)
    }
}
