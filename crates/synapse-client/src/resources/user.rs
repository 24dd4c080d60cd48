/*
[INPUT]:  User records and the transport
[OUTPUT]: User accessors and user-scoped calls (info, documents, nodes, transactions, oauth)
[POS]:    Resource layer - user wrapper
[UPDATE]: When adding user-scoped endpoints
*/

// ### User Endpoints

use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::{SessionToken, TokenManager};
use crate::http::{ApiPath, HttpClient, Result, SynapseError, segment};
use crate::types::{AddDocumentsRequest, DehydrateQuery, ListQuery, Login, UserData};

use super::{Collection, Node, Nodes, Resource, Transactions};

#[derive(Debug, Clone)]
pub struct User {
    data: UserData,
    http: HttpClient,
    full_dehydrate: bool,
}

impl Resource for User {
    type Data = UserData;

    fn from_data(data: UserData, http: HttpClient) -> Self {
        Self {
            data,
            http,
            full_dehydrate: false,
        }
    }
}

impl User {
    pub(crate) fn from_value_dehydrated(
        value: Value,
        http: HttpClient,
        full_dehydrate: bool,
    ) -> Result<Self> {
        let mut user = <Self as Resource>::from_value(value, http)?;
        user.full_dehydrate = full_dehydrate;
        Ok(user)
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.data.refresh_token.as_deref()
    }

    pub fn logins(&self) -> &[Login] {
        &self.data.logins
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.data.phone_numbers
    }

    pub fn legal_names(&self) -> &[String] {
        &self.data.legal_names
    }

    pub fn permission(&self) -> Option<&str> {
        self.data.permission.as_deref()
    }

    pub fn documents(&self) -> &[Value] {
        &self.data.documents
    }

    /// Server fields without a dedicated accessor
    pub fn other(&self) -> &Map<String, Value> {
        &self.data.other
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    pub fn is_fully_dehydrated(&self) -> bool {
        self.full_dehydrate
    }

    fn path(&self) -> String {
        ApiPath::Users.with_id(&self.data.id)
    }

    /// Token manager for this user's refresh token
    pub fn token_manager(&self) -> Result<TokenManager> {
        let refresh_token = self.refresh_token().ok_or_else(|| {
            SynapseError::Config(format!("user {} has no refresh_token", self.id()))
        })?;
        Ok(TokenManager::new(self.http.clone(), self.id(), refresh_token))
    }

    /// One-shot OAuth: request a key, answering a pending challenge if given
    ///
    /// POST /oauth/{user_id}
    pub async fn oauth(&self, challenge_response: Option<&str>) -> Result<SessionToken> {
        self.token_manager()?.refresh(challenge_response).await
    }

    /// Update user info
    ///
    /// PATCH /users/{user_id}
    pub async fn update_info<B>(&self, payload: &B) -> Result<User>
    where
        B: Serialize + ?Sized,
    {
        let value = self.http.patch(&self.path(), payload).await?;
        User::from_value_dehydrated(value, self.http.clone(), self.full_dehydrate)
    }

    /// Attach a KYC document set to the user
    ///
    /// PATCH /users/{user_id} with {"documents": [document]}
    pub async fn add_document(&self, document: Value) -> Result<User> {
        let body = AddDocumentsRequest {
            documents: vec![document],
        };
        self.update_info(&body).await
    }

    /// Create one or more nodes; the server answers with a node listing
    ///
    /// POST /users/{user_id}/nodes
    pub async fn create_node<B>(&self, payload: &B) -> Result<Nodes>
    where
        B: Serialize + ?Sized,
    {
        let path = format!("{}/nodes", self.path());
        let value = self.http.post(&path, payload).await?;
        Collection::from_response(value, self.http.clone(), path, ListQuery::default())
    }

    /// GET /users/{user_id}/nodes/{node_id}
    pub async fn get_node(&self, node_id: &str, full_dehydrate: bool) -> Result<Node> {
        let path = format!("{}/nodes/{}", self.path(), segment(node_id));
        let value = self.http.get(&path, &DehydrateQuery::new(full_dehydrate)).await?;
        Node::from_value(value, self.http.clone())
    }

    /// GET /users/{user_id}/nodes
    pub async fn get_all_nodes(&self, query: &ListQuery) -> Result<Nodes> {
        Collection::fetch(&self.http, format!("{}/nodes", self.path()), query).await
    }

    /// GET /users/{user_id}/trans
    pub async fn get_all_trans(&self, query: &ListQuery) -> Result<Transactions> {
        Collection::fetch(&self.http, format!("{}/trans", self.path()), query).await
    }
}
