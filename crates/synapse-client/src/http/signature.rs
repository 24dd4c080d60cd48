/*
[INPUT]:  Client secret, device fingerprint and request timestamp
[OUTPUT]: Hex-encoded request signature (X-SP-SIGNATURE header)
[POS]:    HTTP layer - per-request signing
[UPDATE]: When changing signing algorithm or message format
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::{Result, SynapseError};

type HmacSha256 = Hmac<Sha256>;

/// Signs outgoing requests with the client secret
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Create a new request signer keyed by the client secret
    pub fn new(client_secret: &str) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(client_secret.as_bytes())
            .map_err(|e| SynapseError::Config(format!("invalid signing key: {e}")))?;
        Ok(Self { mac })
    }

    /// Sign a request
    ///
    /// Format: HMAC-SHA256(secret, "{fingerprint}|{timestamp}")
    /// Returns lowercase hex
    pub fn sign_request(&self, fingerprint: &str, timestamp: i64) -> String {
        let mut mac = self.mac.clone();
        mac.update(format!("{fingerprint}|{timestamp}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
