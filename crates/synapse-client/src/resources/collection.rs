/*
[INPUT]:  Listing envelopes and the call that produced them
[OUTPUT]: Ordered resource pages with pagination cursor
[POS]:    Resource layer - collection wrapper shared by every resource kind
[UPDATE]: When pagination semantics change
*/

use serde_json::Value;
use tracing::debug;

use crate::http::{HttpClient, Result};
use crate::types::{ListQuery, PageEnvelope};

use super::Resource;

/// One page of a listing, in server order.
///
/// `next_page` on the last page returns an empty collection without a request.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    items: Vec<R>,
    page: u32,
    page_count: u32,
    limit: Option<u32>,
    total: u64,
    http: HttpClient,
    path: String,
    query: ListQuery,
}

impl<R: Resource> Collection<R> {
    /// Wrap a listing response; `path` and `query` are kept for `next_page`
    pub fn from_response(
        value: Value,
        http: HttpClient,
        path: impl Into<String>,
        query: ListQuery,
    ) -> Result<Self> {
        let envelope: PageEnvelope<R::Data> = serde_json::from_value(value)?;
        let items = envelope
            .items
            .into_iter()
            .map(|data| R::from_data(data, http.clone()))
            .collect();

        Ok(Self {
            items,
            page: envelope.page,
            page_count: envelope.page_count,
            limit: envelope.limit,
            total: envelope.total,
            http,
            path: path.into(),
            query,
        })
    }

    /// Issue the listing call and wrap the result
    pub(crate) async fn fetch(
        http: &HttpClient,
        path: impl Into<String>,
        query: &ListQuery,
    ) -> Result<Self> {
        let path = path.into();
        let value = http.get(&path, query).await?;
        Self::from_response(value, http.clone(), path, query.clone())
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.page_count
    }

    /// Fetch the following page.
    pub async fn next_page(&self) -> Result<Self> {
        if self.is_last_page() {
            debug!(path = %self.path, page = self.page, "no further pages");
            return Ok(self.exhausted());
        }

        let query = ListQuery {
            page: Some(self.page + 1),
            ..self.query.clone()
        };
        Self::fetch(&self.http, self.path.clone(), &query).await
    }

    fn exhausted(&self) -> Self {
        Self {
            items: Vec::new(),
            page: self.page,
            page_count: self.page_count,
            limit: self.limit,
            total: self.total,
            http: self.http.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
        }
    }
}

impl<R> Collection<R> {
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Total matching records across all pages
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }
}

impl<R> IntoIterator for Collection<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ClientConfig, Credentials, Environment};
    use crate::resources::User;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http_for(server: &MockServer) -> HttpClient {
        let credentials = Credentials {
            client_id: "client_id_1".to_string(),
            client_secret: "client_secret_1".to_string(),
            fingerprint: "fp_1".to_string(),
            ip_address: "127.0.0.1".to_string(),
            environment: Environment::Sandbox,
        };
        HttpClient::with_base_url(credentials, ClientConfig::default(), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_iteration_keeps_server_order() {
        let server = MockServer::start().await;
        let users = Collection::<User>::from_response(
            json!({
                "users": [{ "_id": "c" }, { "_id": "a" }, { "_id": "b" }],
                "page": 1,
                "page_count": 1,
                "users_count": 3
            }),
            http_for(&server),
            "/users",
            ListQuery::default(),
        )
        .unwrap();

        let ids: Vec<&str> = users.iter().map(|u| u.id()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(users.total(), 3);
    }

    #[tokio::test]
    async fn test_next_page_increments_cursor_and_keeps_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{ "_id": "u2" }],
                "page": 2,
                "page_count": 2,
                "limit": 1,
                "users_count": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let first = Collection::<User>::from_response(
            json!({
                "users": [{ "_id": "u1" }],
                "page": 1,
                "page_count": 2,
                "limit": 1,
                "users_count": 2
            }),
            http_for(&server),
            "/users",
            ListQuery::new().per_page(1),
        )
        .unwrap();

        let second = first.next_page().await.unwrap();
        assert_eq!(second.page(), 2);
        assert_eq!(second.get(0).map(|u| u.id()), Some("u2"));
        assert!(second.is_last_page());
    }

    #[tokio::test]
    async fn test_next_page_at_end_is_empty_without_request() {
        let server = MockServer::start().await;
        let last = Collection::<User>::from_response(
            json!({
                "users": [{ "_id": "u1" }],
                "page": 3,
                "page_count": 3,
                "users_count": 21
            }),
            http_for(&server),
            "/users",
            ListQuery::new().page(3),
        )
        .unwrap();

        let next = last.next_page().await.unwrap();
        assert!(next.is_empty());
        assert_eq!(next.page(), 3);
        assert_eq!(next.total(), 21);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_decode_error() {
        let server = MockServer::start().await;
        let result = Collection::<User>::from_response(
            json!({ "users": [{ "name": "missing id" }] }),
            http_for(&server),
            "/users",
            ListQuery::default(),
        );
        assert!(matches!(result, Err(crate::http::SynapseError::Decode(_))));
    }
}
