//! Admin panel API handlers
//!
//! Every response uses the `{"success": ..., ...}` envelope of the admin API.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::app::{Page, QueueEntry, QueueQuery, ViralReport};
use crate::domain::entities::AdminUser;
use crate::error::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct AdminResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> AdminResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// GET /admin-panel/api/moderation-queue
pub async fn get_moderation_queue(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<AdminResponse<Page<QueueEntry>>>, AppError> {
    let page = state.moderation_service.queue(&admin, &query).await?;
    Ok(AdminResponse::ok(page))
}

#[derive(Debug, Deserialize)]
pub struct ViralQuery {
    pub days: Option<String>,
}

/// GET /admin-panel/api/analytics/viral?days=N
pub async fn get_viral_report(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Query(query): Query<ViralQuery>,
) -> Result<Json<AdminResponse<ViralReport>>, AppError> {
    let days = match query.days.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid days: {}", raw)))?,
        ),
    };

    let report = state.analytics_service.viral_report(&admin, days).await?;
    Ok(AdminResponse::ok(report))
}
