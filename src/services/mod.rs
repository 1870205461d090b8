//! Services layer - Application use cases and business logic.

mod auth_service;
mod container;
mod product_service;
pub mod token;
mod user_service;

pub use auth_service::{AuthService, Authenticator, LoginResponse};
pub use container::{ServiceContainer, Services};
pub use product_service::{Catalog, ProductService};
pub use token::{Claims, NoRevocation, RevocationCheck, TokenIssuer};
pub use user_service::{UserManager, UserService};
