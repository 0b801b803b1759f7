//! Session token authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::domain::entities::Viewer;
use crate::domain::ports::{AdminRepository, UserRepository};
use crate::error::AppError;
use crate::AppState;

/// Hash a session token for lookup; only hashes are stored
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the bearer token from the Authorization header
fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// User authentication middleware
///
/// Resolves the token to an active user and injects a `Viewer` into request
/// extensions.
pub async fn user_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request).ok_or(AppError::Unauthorized)?;
    let token_hash = hash_session_token(token);

    let user = state
        .users
        .find_by_session_hash(&token_hash)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(Viewer::from(&user));

    Ok(next.run(request).await)
}

/// Admin panel authentication middleware
///
/// Injects the `AdminUser` into request extensions. Status and role checks
/// happen per operation, so a suspended admin gets 403 rather than 401.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request).ok_or(AppError::Unauthorized)?;
    let token_hash = hash_session_token(token);

    let admin = state
        .admins
        .find_by_session_hash(&token_hash)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(admin = %admin.username, role = %admin.role, "admin request");
    request.extensions_mut().insert(admin);

    Ok(next.run(request).await)
}
