/*
[INPUT]:  Client credentials and configuration
[OUTPUT]: Facade exposing one method per top-level API operation
[POS]:    Client layer - entry point of the crate
[UPDATE]: When adding constructors or top-level operations
*/

mod platform;
mod subscriptions;
mod users;

use tracing::debug;

use crate::auth::TokenManager;
use crate::http::{ClientConfig, Credentials, HttpClient, Result};
use crate::resources::User;

/// Entry point for the API
#[derive(Debug, Clone)]
pub struct SynapseClient {
    http: HttpClient,
}

impl SynapseClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(credentials, config)?;
        debug!(base_url = %http.base_url(), "synapse client created");
        Ok(Self { http })
    }

    /// Create a client against an explicit base URL
    pub fn with_config_and_base_url(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        let http = HttpClient::with_base_url(credentials, config, base_url)?;
        Ok(Self { http })
    }

    pub fn credentials(&self) -> &Credentials {
        self.http.credentials()
    }

    /// Underlying transport, shared with every wrapper this client returns
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Token manager for `user`, driven by its refresh token
    pub fn token_manager(&self, user: &User) -> Result<TokenManager> {
        user.token_manager()
    }
}
