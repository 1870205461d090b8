//! Service Container - Centralized service construction and access.
//!
//! Wires repositories, the token issuer, and services together from a
//! database connection and the application configuration.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::token::{NoRevocation, TokenIssuer};
use super::{AuthService, Authenticator, Catalog, ProductService, UserManager, UserService};
use crate::config::Config;
use crate::infra::{ProductStore, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    product_service: Arc<dyn ProductService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        product_service: Arc<dyn ProductService>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        Self {
            auth_service,
            product_service,
            user_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let products = Arc::new(ProductStore::new(db));

        // Logout is unspecified; the issuer gets the no-op revocation hook
        let issuer = Arc::new(TokenIssuer::from_config(config, Arc::new(NoRevocation)));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), issuer)),
            product_service: Arc::new(Catalog::new(products)),
            user_service: Arc::new(UserManager::new(users)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
