/*
[INPUT]:  Credentials, HTTP configuration, session token store
[OUTPUT]: Signed JSON requests against the versioned API base URL
[POS]:    HTTP layer - core transport shared by facade and resource wrappers
[UPDATE]: When adding connection options or changing request headers
*/

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{Instrument, Span, debug, warn};

use crate::auth::TokenStore;
use crate::http::paths::validate_path;
use crate::http::{RequestSigner, Result, SynapseError};

/// Base URLs for the API
const SANDBOX_BASE_URL: &str = "https://uat-api.synapsefi.com/v3.1";
const PRODUCTION_BASE_URL: &str = "https://api.synapsefi.com/v3.1";

/// Empty query string for calls that take no parameters
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Which API deployment to talk to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Map the legacy `devmode` flag: `true` selects the sandbox
    pub fn from_devmode(devmode: bool) -> Self {
        if devmode {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Span every request is instrumented with; `Span::none()` disables it
    pub span: Span,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            span: Span::none(),
        }
    }
}

/// Client credentials attached to every request
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub fingerprint: String,
    pub ip_address: String,
    #[serde(default)]
    pub environment: Environment,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("fingerprint", &self.fingerprint)
            .field("ip_address", &self.ip_address)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Signed JSON transport for the API
#[derive(Debug, Clone)]
pub struct HttpClient {
    http_client: Client,
    base_url: Url,
    credentials: Arc<Credentials>,
    signer: RequestSigner,
    tokens: TokenStore,
    span: Span,
}

impl HttpClient {
    /// Create a transport pointed at the credentials' environment
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base_url = credentials.environment.base_url();
        Self::with_base_url(credentials, config, base_url)
    }

    /// Create a transport with an explicit base URL
    pub fn with_base_url(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        if credentials.client_id.is_empty() || credentials.client_secret.is_empty() {
            return Err(SynapseError::Config(
                "client_id and client_secret must not be empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            signer: RequestSigner::new(&credentials.client_secret)?,
            credentials: Arc::new(credentials),
            tokens: TokenStore::new(),
            span: config.span,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session token store read on every request
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Build full URL; the base path (`/v3.1`) is kept
    fn url(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    fn apply_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let creds = &self.credentials;
        let timestamp = Utc::now().timestamp();
        let signature = self.signer.sign_request(&creds.fingerprint, timestamp);
        let oauth_key = self.tokens.oauth_key();

        let builder = builder
            .header(
                "X-SP-GATEWAY",
                format!("{}|{}", creds.client_id, creds.client_secret),
            )
            .header("X-SP-USER-IP", creds.ip_address.as_str())
            .header("X-SP-USER-AGENT", creds.fingerprint.as_str())
            .header(
                "X-SP-USER",
                format!("{}|{}", oauth_key.as_deref().unwrap_or(""), creds.fingerprint),
            )
            .header("X-SP-TIMESTAMP", timestamp.to_string())
            .header("X-SP-SIGNATURE", signature);

        match oauth_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Issue one request and return the parsed JSON body.
    ///
    /// An empty 2xx body yields `Value::Null`.
    pub async fn request<Q>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &Q,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        validate_path(path)?;
        let url = self.url(path)?;

        let mut builder = self
            .apply_headers(self.http_client.request(method.clone(), url))
            .query(query);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        self.send_json(method, path, builder)
            .instrument(self.span.clone())
            .await
    }

    async fn send_json(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%method, path, status = status.as_u16(), "synapse request completed");

        if !status.is_success() {
            let err = SynapseError::from_response_body(status, &text);
            warn!(%method, path, status = status.as_u16(), error = %err, "synapse api error");
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Issue one request and decode the body into `T`
    pub async fn request_as<T, Q>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &Q,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let value = self.request(method, path, body, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        self.request(Method::GET, path, None, query).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(&body), NO_QUERY).await
    }

    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, Some(&body), NO_QUERY).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None, NO_QUERY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionToken;
    use chrono::Duration as ChronoDuration;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            client_id: "client_id_1".to_string(),
            client_secret: "client_secret_1".to_string(),
            fingerprint: "fp_1".to_string(),
            ip_address: "127.0.0.1".to_string(),
            environment: Environment::Sandbox,
        }
    }

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::with_base_url(credentials(), ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            Environment::from_devmode(true).base_url(),
            "https://uat-api.synapsefi.com/v3.1"
        );
        assert_eq!(
            Environment::from_devmode(false).base_url(),
            "https://api.synapsefi.com/v3.1"
        );
    }

    #[test]
    fn test_url_keeps_versioned_base_path() {
        let client = HttpClient::new(credentials(), ClientConfig::default()).unwrap();
        let url = client.url("/users/abc").unwrap();
        assert_eq!(url.as_str(), "https://uat-api.synapsefi.com/v3.1/users/abc");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let mut creds = credentials();
        creds.client_secret.clear();
        let err = HttpClient::new(creds, ClientConfig::default()).unwrap_err();
        assert!(matches!(err, SynapseError::Config(_)));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("client_secret_1"));
        assert!(debug.contains("client_id_1"));
    }

    #[tokio::test]
    async fn test_request_attaches_headers_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/institutions"))
            .and(header("X-SP-GATEWAY", "client_id_1|client_secret_1"))
            .and(header("X-SP-USER-IP", "127.0.0.1"))
            .and(header("X-SP-USER-AGENT", "fp_1"))
            .and(header("X-SP-USER", "|fp_1"))
            .and(header_exists("X-SP-SIGNATURE"))
            .and(header_exists("X-SP-TIMESTAMP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "banks": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.get("/institutions", NO_QUERY).await.unwrap();
        assert_eq!(body, serde_json::json!({ "banks": [] }));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_request_attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/u1"))
            .and(header("Authorization", "Bearer oauth_abc"))
            .and(header("X-SP-USER", "oauth_abc|fp_1"))
            .and(body_json(serde_json::json!({ "update": { "email": "a@b.c" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "u1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set_token(SessionToken {
            oauth_key: "oauth_abc".to_string(),
            refresh_token: "refresh_1".to_string(),
            expires_at: Utc::now() + ChronoDuration::hours(1),
        });

        let body = client
            .patch("/users/u1", &serde_json::json!({ "update": { "email": "a@b.c" } }))
            .await
            .unwrap();
        assert_eq!(body["_id"], "u1");
    }

    #[tokio::test]
    async fn test_request_passes_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/u1"))
            .and(query_param("full_dehydrate", "yes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "u1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .get("/users/u1", &[("full_dehydrate", "yes")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "en": "Invalid field value supplied." },
                "error_code": "200",
                "http_code": "400",
                "success": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .post("/users", &serde_json::json!({ "logins": [] }))
            .await
            .unwrap_err();

        match err {
            SynapseError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("200"));
                assert_eq!(message, "Invalid field value supplied.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get("/client", NO_QUERY).await.unwrap_err();
        assert!(matches!(err, SynapseError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/u1/nodes/n1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.delete("/users/u1/nodes/n1").await.unwrap();
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_invalid_path_is_rejected_before_network() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client.get("/admin/secrets", NO_QUERY).await.unwrap_err();
        assert!(matches!(err, SynapseError::InvalidPath(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_transport_error() {
        let client =
            HttpClient::with_base_url(credentials(), ClientConfig::default(), "http://127.0.0.1:1")
                .unwrap();
        let err = client.get("/client", NO_QUERY).await.unwrap_err();
        assert!(matches!(err, SynapseError::Transport(_)));
    }
}
