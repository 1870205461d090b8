//! User service - listing and account creation.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Credential, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::types::{ListQuery, Page};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List users, filtered by email substring and paginated.
    /// Credential material never leaves the repository boundary
    /// serialized; handlers shape responses from the domain entity.
    async fn list_users(&self, query: ListQuery) -> AppResult<Page<User>>;

    /// Create a user with a freshly salted credential (seed/admin path)
    async fn create_user(&self, email: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, query: ListQuery) -> AppResult<Page<User>> {
        self.users.list(&query).await
    }

    async fn create_user(&self, email: String, password: String) -> AppResult<User> {
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let credential = Credential::new(&password);
        self.users.create(email, credential).await
    }
}
