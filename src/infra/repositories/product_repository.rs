//! Product repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::base::{contains_ci, fetch_page, order_from};
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{NewProduct, Product, ProductChanges, ProductKind};
use crate::errors::{AppError, AppResult};
use crate::types::{ListQuery, Page};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// List products, filtered and paginated.
    ///
    /// `kind` and `featured` are equality filters merged into the
    /// predicate only when present; `Some(false)` is a real filter, not
    /// the same as absent.
    async fn list(
        &self,
        query: &ListQuery,
        kind: Option<ProductKind>,
        featured: Option<bool>,
    ) -> AppResult<Page<Product>>;

    /// Persist a new product with `created_at = now`
    async fn insert(&self, product: NewProduct) -> AppResult<Product>;

    /// Overwrite the mutable fields of an existing product wholesale
    async fn overwrite(&self, id: Uuid, changes: ProductChanges) -> AppResult<Product>;

    /// Delete product by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProductRepository backed by the store
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve a sort field name to a column; unknown fields fall back
    /// to the creation timestamp.
    fn sort_column(field: &str) -> product::Column {
        match field {
            "name" => product::Column::Name,
            "price" => product::Column::Price,
            "type" => product::Column::Kind,
            _ => product::Column::CreatedAt,
        }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Product::try_from).transpose()
    }

    async fn list(
        &self,
        query: &ListQuery,
        kind: Option<ProductKind>,
        featured: Option<bool>,
    ) -> AppResult<Page<Product>> {
        let (skip, limit) = query.page_bounds()?;

        let mut select = ProductEntity::find();

        if !query.filter.is_empty() {
            select = select.filter(contains_ci(product::Column::Name, &query.filter));
        }
        if let Some(kind) = kind {
            select = select.filter(product::Column::Kind.eq(kind.code()));
        }
        if let Some(featured) = featured {
            select = select.filter(product::Column::IsFeatured.eq(featured));
        }

        let (field, direction) = query.sort_spec();
        select = select.order_by(Self::sort_column(field), order_from(direction));

        let page = fetch_page(&self.db, select, skip, limit).await?;
        let docs = page
            .docs
            .into_iter()
            .map(Product::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(docs, page.total, page.limit, page.offset))
    }

    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(product.kind.code()),
            name: Set(product.name),
            price: Set(product.price),
            image: Set(product.image),
            description: Set(product.description),
            is_featured: Set(product.is_featured),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Product::try_from(model)
    }

    async fn overwrite(&self, id: Uuid, changes: ProductChanges) -> AppResult<Product> {
        let existing = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        // Every mutable field is replaced; only id, type, and created_at
        // survive from the stored record.
        let mut active: ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.price = Set(changes.price);
        active.image = Set(changes.image);
        active.description = Set(changes.description);
        active.is_featured = Set(changes.is_featured);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Product::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
