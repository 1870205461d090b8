//! Token issuance and verification.
//!
//! Mints signed, time-scoped bearer tokens binding an email claim, and
//! validates them on incoming requests. The signing secret comes from
//! the immutable [`Config`] injected at construction; the issuer itself
//! is stateless, so any number of concurrent issue/verify calls may
//! proceed without coordination.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity the token was issued for
    pub email: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Revocation check consulted on every verification, keyed by the
/// identity claim.
#[async_trait]
pub trait RevocationCheck: Send + Sync {
    async fn is_revoked(&self, email: &str) -> AppResult<bool>;
}

/// Default hook: nothing is ever revoked.
///
/// Logout would plug in here once its semantics are specified.
pub struct NoRevocation;

#[async_trait]
impl RevocationCheck for NoRevocation {
    async fn is_revoked(&self, _email: &str) -> AppResult<bool> {
        Ok(false)
    }
}

/// Signs and verifies bearer tokens with a single shared secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
    revocation: Arc<dyn RevocationCheck>,
}

impl TokenIssuer {
    /// Create an issuer from raw secret material.
    pub fn new(secret: &[u8], expiration_hours: i64, revocation: Arc<dyn RevocationCheck>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_hours,
            revocation,
        }
    }

    /// Create an issuer from application configuration.
    pub fn from_config(config: &Config, revocation: Arc<dyn RevocationCheck>) -> Self {
        Self::new(
            config.jwt_secret_bytes(),
            config.jwt_expiration_hours,
            revocation,
        )
    }

    /// Mint a signed token for `email` with issued-at/expiry metadata.
    pub fn issue(&self, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
    }

    /// Decode and validate a token, then consult the revocation hook.
    ///
    /// Invalid signatures, expired tokens, and malformed input all
    /// collapse into `Unauthenticated`; a revoked identity is reported
    /// separately as `Revoked`.
    pub async fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AppError::Unauthenticated)?;

        if self.revocation.is_revoked(&data.claims.email).await? {
            return Err(AppError::Revoked);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TEST_SECRET, 24, Arc::new(NoRevocation))
    }

    #[tokio::test]
    async fn issued_tokens_round_trip() {
        let issuer = issuer();
        let token = issuer.issue("a@b.com").unwrap();

        let claims = issuer.verify(&token).await.unwrap();
        assert_eq!(claims.email, "a@b.com");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn tampered_signature_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue("a@b.com").unwrap();

        // Flip the first character of the signature segment
        let (head, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

        assert!(matches!(
            issuer.verify(&tampered).await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() {
        let expired_issuer = TokenIssuer::new(TEST_SECRET, -2, Arc::new(NoRevocation));
        let token = expired_issuer.issue("a@b.com").unwrap();

        assert!(matches!(
            expired_issuer.verify(&token).await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn malformed_tokens_are_rejected() {
        assert!(matches!(
            issuer().verify("not-a-token").await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = issuer().issue("a@b.com").unwrap();
        let other = TokenIssuer::new(b"another-secret-key-of-enough-length!", 24, Arc::new(NoRevocation));

        assert!(matches!(
            other.verify(&token).await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn revoked_identities_are_reported_as_revoked() {
        struct RevokeEveryone;

        #[async_trait]
        impl RevocationCheck for RevokeEveryone {
            async fn is_revoked(&self, _email: &str) -> AppResult<bool> {
                Ok(true)
            }
        }

        let issuer = TokenIssuer::new(TEST_SECRET, 24, Arc::new(RevokeEveryone));
        let token = issuer.issue("a@b.com").unwrap();

        assert!(matches!(issuer.verify(&token).await, Err(AppError::Revoked)));
    }
}
