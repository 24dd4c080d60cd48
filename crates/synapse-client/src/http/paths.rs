/*
[INPUT]:  Resource kinds addressed by the API
[OUTPUT]: Static path prefixes and path validation
[POS]:    HTTP layer - path table shared by facade and resource wrappers
[UPDATE]: When the API adds a top-level resource
*/

use std::borrow::Cow;

use crate::http::{Result, SynapseError};

/// Top-level API paths, relative to the versioned base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPath {
    OAuth,
    Client,
    Users,
    Trans,
    Nodes,
    Subscriptions,
    Institutions,
}

impl ApiPath {
    pub const ALL: [ApiPath; 7] = [
        ApiPath::OAuth,
        ApiPath::Client,
        ApiPath::Users,
        ApiPath::Trans,
        ApiPath::Nodes,
        ApiPath::Subscriptions,
        ApiPath::Institutions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApiPath::OAuth => "/oauth/",
            ApiPath::Client => "/client",
            ApiPath::Users => "/users",
            ApiPath::Trans => "/trans",
            ApiPath::Nodes => "/nodes",
            ApiPath::Subscriptions => "/subscriptions",
            ApiPath::Institutions => "/institutions",
        }
    }

    /// `{prefix}/{id}`; the oauth prefix already ends in a slash
    pub fn with_id(self, id: &str) -> String {
        let prefix = self.as_str().trim_end_matches('/');
        format!("{prefix}/{}", segment(id))
    }
}

/// Percent-encode one caller-supplied id so it stays a single path segment
pub fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

fn is_dot_segment(seg: &str) -> bool {
    matches!(
        seg.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// Ensure `path` sits under one of the known prefixes.
///
/// A prefix only matches on a segment boundary, so `/usersx` is rejected.
/// Queries and fragments travel separately, so `?` and `#` never appear here.
/// Empty and dot segments are rejected.
pub fn validate_path(path: &str) -> Result<()> {
    let well_formed = !path.contains(['?', '#'])
        && path
            .split('/')
            .skip(1)
            .all(|seg| !seg.is_empty() && !is_dot_segment(seg));

    let known = well_formed && ApiPath::ALL.iter().any(|p| {
        let prefix = p.as_str();
        let Some(rest) = path.strip_prefix(prefix) else {
            return false;
        };
        if prefix.ends_with('/') {
            // "/oauth/" needs a user id after it
            !rest.is_empty()
        } else {
            rest.is_empty() || rest.starts_with('/')
        }
    });

    if known {
        Ok(())
    } else {
        Err(SynapseError::InvalidPath(path.to_string()))
    }
}
