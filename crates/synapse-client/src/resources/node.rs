/*
[INPUT]:  Node records and the transport
[OUTPUT]: Node accessors and node-scoped calls (verification, transactions, deletion)
[POS]:    Resource layer - node wrapper
[UPDATE]: When adding node-scoped endpoints
*/

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::{HttpClient, Result, segment};
use crate::types::{ListQuery, MicroDepositRequest, NodeData};

use super::{Collection, Resource, Transaction, Transactions};

#[derive(Debug, Clone)]
pub struct Node {
    data: NodeData,
    http: HttpClient,
}

impl Resource for Node {
    type Data = NodeData;

    fn from_data(data: NodeData, http: HttpClient) -> Self {
        Self { data, http }
    }
}

impl Node {
    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn user_id(&self) -> &str {
        &self.data.user_id
    }

    pub fn node_type(&self) -> &str {
        &self.data.node_type
    }

    pub fn is_active(&self) -> Option<bool> {
        self.data.is_active
    }

    pub fn allowed(&self) -> Option<&str> {
        self.data.allowed.as_deref()
    }

    pub fn info(&self) -> &Map<String, Value> {
        &self.data.info
    }

    pub fn other(&self) -> &Map<String, Value> {
        &self.data.other
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// `/users/{user_id}/nodes/{node_id}`
    pub fn path(&self) -> String {
        format!(
            "/users/{}/nodes/{}",
            segment(&self.data.user_id),
            segment(&self.data.id)
        )
    }

    /// Confirm micro-deposit amounts
    ///
    /// PATCH /users/{user_id}/nodes/{node_id}
    pub async fn verify_micro(&self, amounts: &[f64]) -> Result<Node> {
        let body = MicroDepositRequest { micro: amounts };
        let value = self.http.patch(&self.path(), &body).await?;
        Node::from_value(value, self.http.clone())
    }

    /// POST /users/{user_id}/nodes/{node_id}/trans
    pub async fn create_trans<B>(&self, payload: &B) -> Result<Transaction>
    where
        B: Serialize + ?Sized,
    {
        let value = self.http.post(&format!("{}/trans", self.path()), payload).await?;
        Transaction::from_node_value(value, self.http.clone(), self.path())
    }

    /// GET /users/{user_id}/nodes/{node_id}/trans/{trans_id}
    pub async fn get_trans(&self, trans_id: &str) -> Result<Transaction> {
        let path = format!("{}/trans/{}", self.path(), segment(trans_id));
        let value = self.http.get(&path, crate::http::NO_QUERY).await?;
        Transaction::from_node_value(value, self.http.clone(), self.path())
    }

    /// GET /users/{user_id}/nodes/{node_id}/trans
    pub async fn get_all_trans(&self, query: &ListQuery) -> Result<Transactions> {
        Collection::fetch(&self.http, format!("{}/trans", self.path()), query).await
    }

    /// DELETE /users/{user_id}/nodes/{node_id}
    pub async fn delete(&self) -> Result<()> {
        self.http.delete(&self.path()).await?;
        Ok(())
    }
}
