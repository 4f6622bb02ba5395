//! Bearer-token verification.
//!
//! Identity issuance is delegated to an external provider. This module
//! only verifies HS256 tokens signed with the shared secret and lifts
//! their claims into a [`RequestContext`].

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskin_core::config::auth::AuthConfig;
use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::user::AppRole;
use taskin_service::context::RequestContext;

/// Claims expected in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The subject: the user's id at the identity provider.
    pub sub: Uuid,
    /// Roles granted at issue time.
    #[serde(default)]
    pub roles: Vec<AppRole>,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: u64,
    /// Issuer.
    #[serde(default)]
    pub iss: String,
}

/// Verifies bearer tokens against the shared HS256 secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Build a verifier from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[&config.issuer]);
        }
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and produce the caller's request context.
    pub fn verify(&self, token: &str) -> AppResult<RequestContext> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid bearer token: {e}")))?;
        Ok(RequestContext::new(data.claims.sub, data.claims.roles))
    }
}
