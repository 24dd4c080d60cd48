/*
[INPUT]:  User payloads, ids and listing options
[OUTPUT]: User wrappers and user listings
[POS]:    Client layer - user endpoints
[UPDATE]: When adding user endpoints or changing query parameters
*/

// ### User Endpoints

use serde::Serialize;
use tracing::debug;

use crate::client::SynapseClient;
use crate::http::{ApiPath, Result};
use crate::resources::{Collection, User, Users};
use crate::types::{DehydrateQuery, ListQuery};

impl SynapseClient {
    /// Create a user; the returned wrapper is marked fully dehydrated
    ///
    /// POST /users
    pub async fn create_user<B>(&self, payload: &B) -> Result<User>
    where
        B: Serialize + ?Sized,
    {
        debug!("creating a new user");
        let value = self.http.post(ApiPath::Users.as_str(), payload).await?;
        User::from_value_dehydrated(value, self.http.clone(), true)
    }

    /// GET /users/{user_id}?full_dehydrate=yes
    pub async fn get_user(&self, user_id: &str, full_dehydrate: bool) -> Result<User> {
        debug!(user_id, full_dehydrate, "getting a user");
        let path = ApiPath::Users.with_id(user_id);
        let value = self
            .http
            .get(&path, &DehydrateQuery::new(full_dehydrate))
            .await?;
        User::from_value_dehydrated(value, self.http.clone(), full_dehydrate)
    }

    /// GET /users?page={page}&per_page={per_page}&query={query}
    pub async fn get_all_users(&self, query: &ListQuery) -> Result<Users> {
        debug!(?query, "getting all users");
        Collection::fetch(&self.http, ApiPath::Users.as_str(), query).await
    }
}
