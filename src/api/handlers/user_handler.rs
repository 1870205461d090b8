//! User handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::types::{ListQuery, Page, UserPage};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

/// List users (paginated; credential material never included)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Users page", body = UserPage),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<UserResponse>>> {
    tracing::debug!("User listing requested by {}", current_user.email);

    let page = state.user_service.list_users(query).await?;
    Ok(Json(page.map(UserResponse::from)))
}
