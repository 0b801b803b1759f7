//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod accounts;
pub mod admin;
pub mod explore;
pub mod feed;

use axum::http::{header, HeaderMap};

pub use accounts::resolve_account;
pub use admin::{get_moderation_queue, get_viral_report};
pub use explore::{get_hashtag_posts, get_trending};
pub use feed::get_feed;

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// `?page=` as sent; parsing is lenient so it stays a string here
#[derive(Debug, Default, serde::Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}
