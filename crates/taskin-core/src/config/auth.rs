//! Bearer-token verification configuration.
//!
//! Identity issuance is delegated to an external provider; the server only
//! verifies HS256 bearer tokens minted against the shared secret.

use serde::{Deserialize, Serialize};

/// JWT verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret shared with the identity provider.
    pub jwt_secret: String,
    /// Expected token issuer. Empty disables the issuer check.
    #[serde(default)]
    pub issuer: String,
    /// Clock-skew leeway in seconds when validating `exp`/`nbf`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    30
}
