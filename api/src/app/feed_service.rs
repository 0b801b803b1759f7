//! Feed service
//!
//! Builds a viewer's home feed: posts from people they follow, their own
//! posts and public posts, mixed by content kind and paginated, with
//! trending hashtags alongside.

use std::sync::Arc;

use serde::Serialize;

use super::content_mixer::mix_posts;
use super::explore_service::load_trending;
use super::hashtags::TrendingTag;
use super::pagination::{paginate, OutOfRange, Page};
use crate::config::Config;
use crate::domain::entities::{Post, Viewer};
use crate::domain::ports::{PostRepository, UserRepository};
use crate::error::AppError;

/// One page of a viewer's feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub viewer: String,
    pub posts: Page<Post>,
    pub trending: Vec<TrendingTag>,
}

/// Service for assembling home feeds
pub struct FeedService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    users: Arc<UR>,
    posts: Arc<PR>,
    batch_size: u64,
    page_size: usize,
    trending_window_days: i64,
    trending_limit: usize,
}

impl<UR, PR> FeedService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    pub fn new(users: Arc<UR>, posts: Arc<PR>, config: &Config) -> Self {
        Self {
            users,
            posts,
            batch_size: config.feed_batch_size,
            page_size: config.feed_page_size,
            trending_window_days: config.trending_window_days,
            trending_limit: config.trending_limit,
        }
    }

    /// Build the requested page of the viewer's feed.
    ///
    /// `page` is the raw query value. Past-the-end and below-one page numbers
    /// show the last page.
    pub async fn build_page(
        &self,
        viewer: &Viewer,
        page: Option<&str>,
    ) -> Result<FeedPage, AppError> {
        let mut authors = self.users.find_following_ids(&viewer.id).await?;
        authors.push(viewer.id);

        let candidates = self
            .posts
            .find_feed_candidates(&authors, self.batch_size)
            .await?;
        let fetched = candidates.len();

        let mixed = mix_posts(candidates);
        let posts = paginate(mixed, page, self.page_size, OutOfRange::LastPage);

        tracing::debug!(
            viewer = %viewer.username,
            following = authors.len() - 1,
            fetched,
            page = posts.number,
            "built feed page"
        );

        let trending = load_trending(
            self.posts.as_ref(),
            self.trending_window_days,
            self.trending_limit,
        )
        .await?;

        Ok(FeedPage {
            viewer: viewer.username.clone(),
            posts,
            trending,
        })
    }
}
