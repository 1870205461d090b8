//! Bearer-token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated identity extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub email: String,
}

/// Bearer-token authentication middleware.
///
/// Extracts and verifies the token from the Authorization header
/// (signature, expiry, revocation), then injects the `CurrentUser`
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthenticated)?;

    let claims = state.auth_service.verify_token(token).await?;

    request.extensions_mut().insert(CurrentUser {
        email: claims.email,
    });

    Ok(next.run(request).await)
}
