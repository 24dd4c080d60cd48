/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Synapse client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod client;
pub mod http;
pub mod resources;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{SessionToken, TokenManager, TokenState, TokenStore};

// Re-export commonly used types from http
pub use http::{
    ApiPath,
    ClientConfig,
    Credentials,
    Environment,
    HttpClient,
    RequestSigner,
    Result,
    SynapseError,
};

pub use client::SynapseClient;

pub use resources::{
    Collection,
    Node,
    Nodes,
    Resource,
    Subscription,
    Subscriptions,
    Transaction,
    Transactions,
    User,
    Users,
};

// Re-export all types
pub use types::*;
