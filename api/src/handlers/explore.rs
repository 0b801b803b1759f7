//! Explore handlers: trending and per-hashtag listings

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{wants_json, PageQuery};
use crate::app::TrendingTag;
use crate::error::AppError;
use crate::feed::{render_hashtag_page, render_trending};
use crate::AppState;

/// Upper bound on `?limit=` for trending
const MAX_TRENDING_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<String>,
}

#[derive(Serialize)]
struct TrendingResponse {
    trending: Vec<TrendingTag>,
}

/// GET /explore/trending?limit=N
pub async fn get_trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let limit = match query.limit.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<usize>()
                .map_err(|_| AppError::BadRequest(format!("Invalid limit: {}", raw)))?
                .clamp(1, MAX_TRENDING_LIMIT),
        ),
    };

    let trending = state.explore_service.trending(limit).await?;

    if wants_json(&headers) {
        Ok(Json(TrendingResponse { trending }).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_trending(&trending),
        )
            .into_response())
    }
}

/// GET /hashtags/:tag?page=N
pub async fn get_hashtag_posts(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = state
        .explore_service
        .hashtag_posts(&tag, query.page.as_deref())
        .await?;

    if wants_json(&headers) {
        Ok(Json(page).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_hashtag_page(&page),
        )
            .into_response())
    }
}
