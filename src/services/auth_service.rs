//! Authentication service - credential lookup and token issuance.
//!
//! The login flow: exact-match credential lookup, salted-hash password
//! check, token issuance. Every failure along the way collapses into a
//! single generic `InvalidCredentials` so a caller cannot tell "no such
//! user" apart from "wrong password".

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::token::{Claims, TokenIssuer};
use crate::domain::Credential;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Payload returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Authenticated identity
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Signed bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate and return a bearer token
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Verify a bearer token and extract its claims
    async fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    issuer: Arc<TokenIssuer>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, issuer: Arc<TokenIssuer>) -> Self {
        Self { users, issuer }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let user = self.users.find_by_email(&email).await?;

        // Verify against a placeholder credential when the lookup misses
        // so timing does not reveal whether the email exists.
        let credential = user
            .as_ref()
            .map(|u| u.credential.clone())
            .unwrap_or_else(Credential::placeholder);
        let password_valid = credential.matches(&password);

        if user.is_none() || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issuer.issue(&email)?;
        Ok(LoginResponse { email, token })
    }

    async fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.issuer.verify(token).await
    }
}
