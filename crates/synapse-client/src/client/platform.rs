/*
[INPUT]:  Listing options, public key scopes
[OUTPUT]: Platform-wide listings, institutions and public keys
[POS]:    Client layer - endpoints not scoped to a single user
[UPDATE]: When adding platform-level endpoints
*/

use serde_json::Value;
use tracing::debug;

use crate::client::SynapseClient;
use crate::http::{ApiPath, NO_QUERY, Result};
use crate::resources::{Collection, Nodes, Transactions};
use crate::types::{ListQuery, PublicKey, PublicKeyEnvelope, PublicKeyQuery};

impl SynapseClient {
    /// GET /trans
    pub async fn get_all_trans(&self, query: &ListQuery) -> Result<Transactions> {
        debug!(?query, "getting all platform transactions");
        Collection::fetch(&self.http, ApiPath::Trans.as_str(), query).await
    }

    /// GET /nodes
    pub async fn get_all_nodes(&self, query: &ListQuery) -> Result<Nodes> {
        debug!(?query, "getting all platform nodes");
        Collection::fetch(&self.http, ApiPath::Nodes.as_str(), query).await
    }

    /// GET /institutions, returned as raw JSON
    pub async fn get_all_inst(&self) -> Result<Value> {
        debug!("getting all institutions");
        self.http.get(ApiPath::Institutions.as_str(), NO_QUERY).await
    }

    /// GET /client?issue_public_key=YES&scope=...
    pub async fn issue_public_key<S>(&self, issue: bool, scope: &[S]) -> Result<PublicKey>
    where
        S: AsRef<str>,
    {
        let query = PublicKeyQuery::new(issue, scope);
        debug!(scope = %query.scope, "issuing public key");
        let envelope: PublicKeyEnvelope = self
            .http
            .request_as(reqwest::Method::GET, ApiPath::Client.as_str(), None, &query)
            .await?;
        Ok(envelope.public_key_obj)
    }
}
