//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::base::{contains_ci, fetch_page, order_from};
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Credential, User};
use crate::errors::{AppError, AppResult};
use crate::types::{ListQuery, Page};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact email match.
    ///
    /// This is the authentication lookup; it never applies the
    /// substring filter used by listings.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user with the given credential
    async fn create(&self, email: String, credential: Credential) -> AppResult<User>;

    /// Insert a batch of users (seed operation); returns the count inserted
    async fn insert_many(&self, users: Vec<(String, Credential)>) -> AppResult<u64>;

    /// List users, filtered by email substring and paginated
    async fn list(&self, query: &ListQuery) -> AppResult<Page<User>>;
}

/// Concrete implementation of UserRepository backed by the store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> user::Column {
        match field {
            "email" => user::Column::Email,
            _ => user::Column::CreatedAt,
        }
    }

    fn active_model(email: String, credential: Credential) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(credential.hash().to_string()),
            password_salt: Set(credential.salt().to_string()),
            created_at: Set(Utc::now()),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, email: String, credential: Credential) -> AppResult<User> {
        let model = Self::active_model(email, credential)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn insert_many(&self, users: Vec<(String, Credential)>) -> AppResult<u64> {
        let count = users.len() as u64;
        if count == 0 {
            return Ok(0);
        }

        let models = users
            .into_iter()
            .map(|(email, credential)| Self::active_model(email, credential));

        UserEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }

    async fn list(&self, query: &ListQuery) -> AppResult<Page<User>> {
        let (skip, limit) = query.page_bounds()?;

        let mut select = UserEntity::find();
        if !query.filter.is_empty() {
            select = select.filter(contains_ci(user::Column::Email, &query.filter));
        }

        let (field, direction) = query.sort_spec();
        select = select.order_by(Self::sort_column(field), order_from(direction));

        let page = fetch_page(&self.db, select, skip, limit).await?;
        Ok(page.map(User::from))
    }
}
