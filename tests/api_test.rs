//! Integration tests for API endpoints.
//!
//! In-memory repositories stand in for the backing store so the real
//! services, router, middleware, and error translation are exercised
//! end to end without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

use colchoneria::api::{create_router, AppState};
use colchoneria::domain::{Credential, NewProduct, Product, ProductChanges, ProductKind, User};
use colchoneria::errors::{AppError, AppResult};
use colchoneria::infra::{Database, ProductRepository, UserRepository};
use colchoneria::services::{Authenticator, Catalog, NoRevocation, TokenIssuer, UserManager};
use colchoneria::types::{ListQuery, Page, SortDirection};

const TEST_SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

// =============================================================================
// In-memory repositories
// =============================================================================

#[derive(Default)]
struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    /// Seeded with the account the login tests authenticate against.
    fn seeded() -> Self {
        let store = Self::default();
        store.users.lock().unwrap().push(User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            credential: Credential::new("secret"),
            created_at: Utc::now(),
        });
        store
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, email: String, credential: Credential) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            email,
            credential,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn insert_many(&self, users: Vec<(String, Credential)>) -> AppResult<u64> {
        let count = users.len() as u64;
        for (email, credential) in users {
            self.create(email, credential).await?;
        }
        Ok(count)
    }

    async fn list(&self, query: &ListQuery) -> AppResult<Page<User>> {
        let (skip, limit) = query.page_bounds()?;
        let needle = query.filter.to_lowercase();

        let mut matching: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        sort_in_place(&mut matching, query, |u| u.email.clone(), |u| u.created_at);
        Ok(page_of(matching, skip, limit))
    }
}

#[derive(Default)]
struct InMemoryProducts {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list(
        &self,
        query: &ListQuery,
        kind: Option<ProductKind>,
        featured: Option<bool>,
    ) -> AppResult<Page<Product>> {
        let (skip, limit) = query.page_bounds()?;
        let needle = query.filter.to_lowercase();

        let mut matching: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .filter(|p| kind.map_or(true, |k| p.kind == k))
            .filter(|p| featured.map_or(true, |f| p.is_featured == f))
            .cloned()
            .collect();

        sort_in_place(&mut matching, query, |p| p.name.clone(), |p| p.created_at);
        Ok(page_of(matching, skip, limit))
    }

    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let product = Product {
            id: Uuid::new_v4(),
            kind: product.kind,
            name: product.name,
            price: product.price,
            image: product.image,
            description: product.description,
            is_featured: product.is_featured,
            created_at: Utc::now(),
        };
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn overwrite(&self, id: Uuid, changes: ProductChanges) -> AppResult<Product> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        product.name = changes.name;
        product.price = changes.price;
        product.image = changes.image;
        product.description = changes.description;
        product.is_featured = changes.is_featured;
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Order by the query's sort key: `name`/`email` use the text key,
/// anything else the creation timestamp.
fn sort_in_place<T>(
    items: &mut [T],
    query: &ListQuery,
    text_key: impl Fn(&T) -> String,
    created_key: impl Fn(&T) -> chrono::DateTime<Utc>,
) {
    let (field, direction) = query.sort_spec();
    match field {
        "name" | "email" => items.sort_by_key(text_key),
        _ => items.sort_by_key(created_key),
    }
    if direction == SortDirection::Descending {
        items.reverse();
    }
}

fn page_of<T>(items: Vec<T>, skip: u64, limit: u64) -> Page<T> {
    let total = items.len() as u64;
    let docs = items
        .into_iter()
        .skip(skip as usize)
        .take(limit as usize)
        .collect();
    Page::new(docs, total, limit, skip)
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    let users = Arc::new(InMemoryUsers::seeded());
    let products = Arc::new(InMemoryProducts::default());
    let issuer = Arc::new(TokenIssuer::new(TEST_SECRET, 24, Arc::new(NoRevocation)));

    let state = AppState::new(
        Arc::new(Authenticator::new(users.clone(), issuer)),
        Arc::new(Catalog::new(products)),
        Arc::new(UserManager::new(users)),
        Arc::new(Database::from_connection(DatabaseConnection::default())),
    );

    create_router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_colchon(app: &Router, name: &str, featured: bool) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/colchones",
            serde_json::json!({
                "name": name,
                "price": "299.99",
                "image": "https://example.com/p.jpg",
                "description": "Demo product",
                "isFeatured": featured,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn login_returns_email_and_token() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            serde_json::json!({"email": "a@b.com", "password": "secret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "a@b.com");
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app();

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            serde_json::json!({"email": "a@b.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(json_request(
            "POST",
            "/login",
            serde_json::json!({"email": "nope@b.com", "password": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Identical payloads: the caller cannot tell the two causes apart
    let first = body_json(wrong_password).await;
    let second = body_json(unknown_email).await;
    assert_eq!(first, second);
    assert_eq!(first["msg"], "Invalid credentials");
}

#[tokio::test]
async fn users_listing_requires_a_bearer_token() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get_request("/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Log in, then retry with the issued token
    let login = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            serde_json::json!({"email": "a@b.com", "password": "secret"}),
        ))
        .await
        .unwrap();
    let token = body_json(login).await["token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["docs"][0]["email"], "a@b.com");
    // Credential material never reaches the wire
    assert!(body["docs"][0].get("hash").is_none());
    assert!(body["docs"][0].get("salt").is_none());
    assert!(body["docs"][0].get("credential").is_none());
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Product CRUD
// =============================================================================

#[tokio::test]
async fn product_crud_round_trip() {
    let app = test_app();

    // Create
    create_colchon(&app, "M1", false).await;

    // Find its id via the subtype listing
    let listing = body_json(
        app.clone()
            .oneshot(get_request("/colchones"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listing["total"], 1);
    let id = listing["docs"][0]["id"].as_str().unwrap().to_string();

    // Read: defaults applied
    let fetched = body_json(
        app.clone()
            .oneshot(get_request(&format!("/colchones/{}", id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(fetched["name"], "M1");
    assert_eq!(fetched["type"], 1);
    assert_eq!(fetched["isFeatured"], false);

    // Edit: wholesale overwrite flips the featured flag
    let edited = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/colchones/{}", id),
            serde_json::json!({
                "name": "M1",
                "price": "299.99",
                "image": "https://example.com/p.jpg",
                "description": "Demo product",
                "isFeatured": true,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(edited.status(), StatusCode::OK);
    assert_eq!(body_json(edited).await["msg"], "Product edited correctly!");

    let fetched = body_json(
        app.clone()
            .oneshot(get_request(&format!("/colchones/{}", id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(fetched["isFeatured"], true);

    // Delete: 204 without a body, then the read fails
    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/colchones/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = app
        .oneshot(get_request(&format!("/colchones/{}", id)))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn subtype_routes_pin_the_product_type() {
    let app = test_app();

    create_colchon(&app, "Colchon A", false).await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/somieres",
            serde_json::json!({
                "name": "Somier B",
                "price": "129.00",
                "image": "https://example.com/s.jpg",
                "description": "Demo somier",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let colchones = body_json(
        app.clone()
            .oneshot(get_request("/colchones"))
            .await
            .unwrap(),
    )
    .await;
    let somieres = body_json(
        app.clone()
            .oneshot(get_request("/somieres"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(colchones["total"], 1);
    assert_eq!(colchones["docs"][0]["type"], 1);
    assert_eq!(somieres["total"], 1);
    assert_eq!(somieres["docs"][0]["type"], 2);
}

#[tokio::test]
async fn featured_page_only_lists_featured_products() {
    let app = test_app();

    create_colchon(&app, "Plain", false).await;
    create_colchon(&app, "Starred", true).await;

    let home = body_json(app.clone().oneshot(get_request("/")).await.unwrap()).await;
    assert_eq!(home["total"], 1);
    assert_eq!(home["docs"][0]["name"], "Starred");
}

#[tokio::test]
async fn missing_fields_fail_validation() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/colchones",
            serde_json::json!({"name": "No price"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_product_id_is_a_client_error() {
    let app = test_app();

    let response = app
        .oneshot(get_request("/colchones/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Listing contract
// =============================================================================

#[tokio::test]
async fn filter_matches_substrings_case_insensitively() {
    let app = test_app();

    create_colchon(&app, "Alpha", false).await;
    create_colchon(&app, "Beta", false).await;
    create_colchon(&app, "AlphaBeta", false).await;

    let filtered = body_json(
        app.oneshot(get_request("/colchones?filter=alpha"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(filtered["total"], 2);
    let names: Vec<&str> = filtered["docs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Alpha"));
    assert!(names.contains(&"AlphaBeta"));
    assert!(!names.contains(&"Beta"));
}

#[tokio::test]
async fn skipping_past_the_end_returns_an_empty_page() {
    let app = test_app();

    create_colchon(&app, "Only", false).await;

    let page = body_json(
        app.oneshot(get_request("/colchones?skip=1&limit=10"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(page["docs"].as_array().unwrap().len(), 0);
    assert_eq!(page["total"], 1);
    assert_eq!(page["offset"], 1);
}

#[tokio::test]
async fn listing_is_idempotent_without_writes() {
    let app = test_app();

    create_colchon(&app, "Stable A", false).await;
    create_colchon(&app, "Stable B", true).await;

    let first = body_json(
        app.clone()
            .oneshot(get_request("/colchones?skip=0&limit=10&sort=name"))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(get_request("/colchones?skip=0&limit=10&sort=name"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn sort_parameter_orders_the_page() {
    let app = test_app();

    create_colchon(&app, "Zeta", false).await;
    create_colchon(&app, "Alpha", false).await;

    let ascending = body_json(
        app.clone()
            .oneshot(get_request("/colchones?sort=name"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ascending["docs"][0]["name"], "Alpha");

    let descending = body_json(
        app.oneshot(get_request("/colchones?sort=-name"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(descending["docs"][0]["name"], "Zeta");
}

#[tokio::test]
async fn zero_limit_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(get_request("/colchones?limit=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
