/*
[INPUT]:  Credentials, client configuration and API paths
[OUTPUT]: Signed HTTP requests and parsed JSON responses
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding headers, paths or changing transport behavior
*/

pub mod client;
pub mod error;
pub mod paths;
pub mod signature;

pub use error::{Result, SynapseError};
pub use paths::{ApiPath, segment};
pub use signature::RequestSigner;

pub use client::{ClientConfig, Credentials, Environment, HttpClient, NO_QUERY};
