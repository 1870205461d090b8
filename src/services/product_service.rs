//! Product service - catalog use cases.
//!
//! Sub-listings (colchones, somieres, featured) are thin wrappers that
//! fix one equality filter and delegate to the shared listing path.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewProduct, Product, ProductChanges, ProductKind};
use crate::errors::{AppResult, OptionExt};
use crate::infra::ProductRepository;
use crate::types::{ListQuery, Page};

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Get product by ID
    async fn get(&self, id: Uuid) -> AppResult<Product>;

    /// List all products
    async fn list(&self, query: ListQuery) -> AppResult<Page<Product>>;

    /// List colchon-type products
    async fn list_colchones(&self, query: ListQuery) -> AppResult<Page<Product>>;

    /// List somier-type products
    async fn list_somieres(&self, query: ListQuery) -> AppResult<Page<Product>>;

    /// List featured products
    async fn list_featured(&self, query: ListQuery) -> AppResult<Page<Product>>;

    /// Create a new product
    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Overwrite a product's mutable fields
    async fn edit(&self, id: Uuid, changes: ProductChanges) -> AppResult<Product>;

    /// Delete a product
    async fn remove(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProductService.
pub struct Catalog {
    products: Arc<dyn ProductRepository>,
}

impl Catalog {
    /// Create new product service instance
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductService for Catalog {
    async fn get(&self, id: Uuid) -> AppResult<Product> {
        self.products.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list(&self, query: ListQuery) -> AppResult<Page<Product>> {
        self.products.list(&query, None, None).await
    }

    async fn list_colchones(&self, query: ListQuery) -> AppResult<Page<Product>> {
        self.products
            .list(&query, Some(ProductKind::Colchon), None)
            .await
    }

    async fn list_somieres(&self, query: ListQuery) -> AppResult<Page<Product>> {
        self.products
            .list(&query, Some(ProductKind::Somier), None)
            .await
    }

    async fn list_featured(&self, query: ListQuery) -> AppResult<Page<Product>> {
        self.products.list(&query, None, Some(true)).await
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        self.products.insert(product).await
    }

    async fn edit(&self, id: Uuid, changes: ProductChanges) -> AppResult<Product> {
        self.products.overwrite(id, changes).await
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.products.delete(id).await
    }
}
