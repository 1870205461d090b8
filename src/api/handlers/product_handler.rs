//! Product catalog handlers.
//!
//! The two subtypes share one handler set; the subtype routes pin the
//! product kind before delegating to the shared create path, mirroring
//! how the sub-listings pin their equality filter.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewProduct, ProductChanges, ProductKind, ProductResponse};
use crate::errors::AppResult;
use crate::types::{Created, ListQuery, MessageResponse, NoContent, Page, ProductPage};

/// Product creation request.
///
/// The product type is pinned by the route, not the body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Colchón Viscoelástico 150x190")]
    pub name: String,
    /// Price as a decimal string
    #[validate(length(min = 1, message = "Price is required"))]
    #[schema(example = "299.99")]
    pub price: String,
    /// Image URI
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
    /// Product description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Whether the product is featured (defaults to false)
    #[serde(default)]
    pub is_featured: bool,
}

impl CreateProductRequest {
    fn into_new_product(self, kind: ProductKind) -> NewProduct {
        NewProduct {
            kind,
            name: self.name,
            price: self.price,
            image: self.image,
            description: self.description,
            is_featured: self.is_featured,
        }
    }
}

/// Product edit request.
///
/// Edits overwrite the mutable fields wholesale, so every field is
/// mandatory; omitting one is a validation error rather than a merge.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditProductRequest {
    /// Product name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Price as a decimal string
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
    /// Image URI
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
    /// Product description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Whether the product is featured
    pub is_featured: bool,
}

impl From<EditProductRequest> for ProductChanges {
    fn from(request: EditProductRequest) -> Self {
        ProductChanges {
            name: request.name,
            price: request.price,
            image: request.image,
            description: request.description,
            is_featured: request.is_featured,
        }
    }
}

/// Create product catalog routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/colchones", get(list_colchones).post(create_colchon))
        .route(
            "/colchones/:id",
            get(get_product)
                .put(edit_product)
                .patch(edit_product)
                .delete(delete_product),
        )
        .route("/somieres", get(list_somieres).post(create_somier))
        .route(
            "/somieres/:id",
            get(get_product)
                .put(edit_product)
                .patch(edit_product)
                .delete(delete_product),
        )
}

/// Featured products (home page)
#[utoipa::path(
    get,
    path = "/",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "Featured products page", body = ProductPage)
    )
)]
pub async fn featured_index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<ProductResponse>>> {
    let page = state.product_service.list_featured(query).await?;
    Ok(Json(page.map(ProductResponse::from)))
}

/// List colchon-type products
#[utoipa::path(
    get,
    path = "/colchones",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "Colchon products page", body = ProductPage)
    )
)]
pub async fn list_colchones(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<ProductResponse>>> {
    let page = state.product_service.list_colchones(query).await?;
    Ok(Json(page.map(ProductResponse::from)))
}

/// List somier-type products
#[utoipa::path(
    get,
    path = "/somieres",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "Somier products page", body = ProductPage)
    )
)]
pub async fn list_somieres(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<ProductResponse>>> {
    let page = state.product_service.list_somieres(query).await?;
    Ok(Json(page.map(ProductResponse::from)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/colchones/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.product_service.get(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Create a colchon-type product
#[utoipa::path(
    post,
    path = "/colchones",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product saved", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_colchon(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created> {
    state
        .product_service
        .create(payload.into_new_product(ProductKind::Colchon))
        .await?;

    Ok(Created(MessageResponse::new("Product saved!")))
}

/// Create a somier-type product
#[utoipa::path(
    post,
    path = "/somieres",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product saved", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_somier(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created> {
    state
        .product_service
        .create(payload.into_new_product(ProductKind::Somier))
        .await?;

    Ok(Created(MessageResponse::new("Product saved!")))
}

/// Edit a product (wholesale overwrite of the mutable fields)
#[utoipa::path(
    put,
    path = "/colchones/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = EditProductRequest,
    responses(
        (status = 200, description = "Product edited", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn edit_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EditProductRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.product_service.edit(id, payload.into()).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Product edited correctly!")),
    ))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/colchones/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.product_service.remove(id).await?;
    Ok(NoContent)
}
