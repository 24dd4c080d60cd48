/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for synapse-client tests

#![allow(dead_code)]

use serde_json::{Value, json};
use synapse_client::{ClientConfig, Credentials, Environment, SynapseClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Install a test subscriber once so `RUST_LOG` works in failing tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_credentials() -> Credentials {
    Credentials {
        client_id: "client_id_test".to_string(),
        client_secret: "client_secret_test".to_string(),
        fingerprint: "fingerprint_test".to_string(),
        ip_address: "127.0.0.1".to_string(),
        environment: Environment::Sandbox,
    }
}

/// Client pointed at the mock server
pub fn mock_client(server: &MockServer) -> SynapseClient {
    init_tracing();
    SynapseClient::with_config_and_base_url(test_credentials(), ClientConfig::default(), &server.uri())
        .expect("client should build against mock server")
}

pub fn user_json(user_id: &str) -> Value {
    json!({
        "_id": user_id,
        "_links": { "self": { "href": format!("https://uat-api.synapsefi.com/v3.1/users/{user_id}") } },
        "client": { "id": "client_id_test", "name": "Test Client" },
        "doc_status": { "physical_doc": "MISSING|INVALID", "virtual_doc": "MISSING|INVALID" },
        "documents": [],
        "emails": [],
        "extra": { "cip_tag": 1, "is_business": false, "supp_id": "" },
        "is_hidden": false,
        "legal_names": ["Test User"],
        "logins": [{ "email": "test@synapsefi.com", "scope": "READ_AND_WRITE" }],
        "permission": "UNVERIFIED",
        "phone_numbers": ["901.111.1111"],
        "photos": [],
        "refresh_token": "refresh_test"
    })
}

pub fn node_json(user_id: &str, node_id: &str) -> Value {
    json!({
        "_id": node_id,
        "allowed": "CREDIT-AND-DEBIT",
        "client": { "id": "client_id_test", "name": "Test Client" },
        "info": { "balance": { "amount": 0.0, "currency": "USD" }, "nickname": "My Deposit Account" },
        "is_active": true,
        "type": "DEPOSIT-US",
        "user_id": user_id
    })
}

pub fn subscription_json(sub_id: &str, is_active: bool) -> Value {
    json!({
        "_id": sub_id,
        "client_id": "client_id_test",
        "is_active": is_active,
        "scope": ["USERS|POST", "USER|PATCH", "NODES|POST", "NODE|PATCH", "TRANS|POST", "TRAN|PATCH"],
        "url": "https://requestb.in/zp216zzp"
    })
}
