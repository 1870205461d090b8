//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Product, ProductKind};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Product type code, see [`ProductKind`]
    #[sea_orm(column_name = "type")]
    pub kind: i32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Fallible: a row holding a type code outside the enumeration is a
/// store-level corruption and surfaces as an internal error.
impl TryFrom<Model> for Product {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = ProductKind::try_from(model.kind).map_err(AppError::internal)?;

        Ok(Product {
            id: model.id,
            kind,
            name: model.name,
            price: model.price,
            image: model.image,
            description: model.description,
            is_featured: model.is_featured,
            created_at: model.created_at,
        })
    }
}
