/*
[INPUT]:  Refresh tokens, one-time codes and OAuth responses
[OUTPUT]: OAuth session tokens and auth errors
[POS]:    Auth layer - handles per-user OAuth sessions
[UPDATE]: When the OAuth flow or token storage changes
*/

pub mod manager;
pub mod token;

pub use manager::{TokenManager, TokenState};
pub use token::{SessionToken, TokenStore};
