//! Feed handlers
//!
//! Supports content negotiation: Accept: application/json for JSON, otherwise text/plain.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::{wants_json, PageQuery};
use crate::domain::entities::Viewer;
use crate::error::AppError;
use crate::feed::render_feed;
use crate::AppState;

/// GET /feed?page=N
///
/// Returns one page of the authenticated viewer's mixed feed.
/// - Accept: application/json → JSON response
/// - Otherwise → Plain text
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let feed = state
        .feed_service
        .build_page(&viewer, query.page.as_deref())
        .await?;

    if wants_json(&headers) {
        Ok(Json(feed).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_feed(&feed),
        )
            .into_response())
    }
}
