//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, product_handler, user_handler};
use crate::domain::{ProductResponse, UserResponse};
use crate::services::LoginResponse;
use crate::types::{MessageResponse, ProductPage, UserPage};

/// OpenAPI documentation for the Colchonería backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Colchonería API",
        version = "0.1.0",
        description = "E-commerce backend: product catalog, pagination, and salted-hash authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Product endpoints
        product_handler::featured_index,
        product_handler::list_colchones,
        product_handler::create_colchon,
        product_handler::list_somieres,
        product_handler::create_somier,
        product_handler::get_product,
        product_handler::edit_product,
        product_handler::delete_product,
        // Authentication endpoints
        auth_handler::login,
        // User endpoints
        user_handler::list_users,
    ),
    components(
        schemas(
            // Domain types
            ProductResponse,
            UserResponse,
            ProductPage,
            UserPage,
            MessageResponse,
            // Auth types
            auth_handler::LoginRequest,
            LoginResponse,
            // Product handler types
            product_handler::CreateProductRequest,
            product_handler::EditProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Products", description = "Product catalog operations"),
        (name = "Authentication", description = "User login"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /login"))
                        .build(),
                ),
            );
        }
    }
}
