//! Token issuing and verification for login sessions.
//!
//! Tokens are HS256 JSON Web Tokens carrying the owning user's identifier
//! and an expiry one hour after issue. Verification checks the signature
//! first, then compares the embedded expiry against the clock by hand so the
//! boundary instant is rejected without leeway: a token dies exactly at its
//! expiry second, not some grace period later.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::Error;

/// Seconds a freshly issued token stays valid.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the user the token was issued to.
    pub user_id: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// No token accompanied the request.
    #[error("no token supplied")]
    Missing,
    /// The embedded expiry has passed.
    #[error("token expired")]
    Expired,
    /// The token failed structural or signature checks.
    #[error("token malformed or signature mismatch")]
    Malformed,
}

impl From<TokenError> for Error {
    /// Collapse every rejection into one uniform response.
    ///
    /// Clients only learn that authentication failed; the precise reason is
    /// logged for operators.
    fn from(err: TokenError) -> Self {
        debug!(reason = %err, "token rejected");
        Error::unauthorized("invalid or missing token")
    }
}

/// Issues signed tokens for authenticated users.
#[derive(Clone)]
pub struct TokenSigner {
    key: EncodingKey,
}

impl TokenSigner {
    /// Signer using the HS256 `secret` shared across route groups.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id` expiring [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token anchored at an explicit instant.
    ///
    /// Exposed so tests can control the clock, including minting tokens that
    /// are already expired.
    pub fn issue_at(
        &self,
        user_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            user_id: user_id.to_owned(),
            exp: issued_at.timestamp() + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.key)
    }
}

/// Verifies presented tokens and recovers the owning user.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Verifier for tokens signed with the same `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared manually in `verify_at` so the boundary instant
        // is rejected without the library's default leeway.
        validation.validate_exp = false;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` against the current clock and return the user it was
    /// issued to.
    pub fn verify(&self, token: Option<&str>) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify against an explicit clock instant.
    ///
    /// Fails with [`TokenError::Expired`] when `now` is at or past the
    /// embedded expiry; an instant strictly before it passes.
    pub fn verify_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let raw = token.ok_or(TokenError::Missing)?;
        let data = decode::<Claims>(raw, &self.key, &self.validation).map_err(|err| {
            debug!(error = %err, "token failed decoding");
            TokenError::Malformed
        })?;
        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(data.claims.user_id)
    }
}
