//! Account lookup handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::app::PublicProfile;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub identifier: Option<String>,
}

/// GET /accounts/resolve?identifier=...
///
/// Accepts a username, email address or Indian phone number in any common
/// format. Rate limited per client IP.
pub async fn resolve_account(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<PublicProfile>, AppError> {
    let identifier = query
        .identifier
        .ok_or_else(|| AppError::BadRequest("identifier is required".to_string()))?;

    let user = state.account_service.resolve(&identifier).await?;
    Ok(Json(PublicProfile::from(&user)))
}
