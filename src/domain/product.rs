//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The two disjoint product categories carried by the catalog.
///
/// Persisted and serialized as its numeric code, not its symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ProductKind {
    /// Mattress
    Colchon = 1,
    /// Bed base
    Somier = 2,
}

impl ProductKind {
    /// Numeric code stored in the database and sent on the wire.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<ProductKind> for i32 {
    fn from(kind: ProductKind) -> Self {
        kind.code()
    }
}

impl TryFrom<i32> for ProductKind {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ProductKind::Colchon),
            2 => Ok(ProductKind::Somier),
            other => Err(format!("unknown product type code: {}", other)),
        }
    }
}

/// Product domain entity
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub kind: ProductKind,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to persist a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub kind: ProductKind,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
}

/// Replacement values for an edit.
///
/// Edits overwrite every mutable field wholesale rather than merging, so
/// all fields are mandatory; the caller re-sends the full record.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
}

/// Product response (wire shape)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Unique product identifier
    pub id: Uuid,
    /// Product type code (1 = colchon, 2 = somier)
    #[serde(rename = "type")]
    #[schema(value_type = i32, example = 1)]
    pub kind: ProductKind,
    /// Product name
    #[schema(example = "Colchón Viscoelástico 150x190")]
    pub name: String,
    /// Price as a decimal string
    #[schema(example = "299.99")]
    pub price: String,
    /// Image URI
    pub image: String,
    /// Product description
    pub description: String,
    /// Whether the product is shown on the featured page
    pub is_featured: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            kind: product.kind,
            name: product.name,
            price: product.price,
            image: product.image,
            description: product.description,
            is_featured: product.is_featured,
            created_at: product.created_at,
        }
    }
}
