//! Explore service
//!
//! Trending hashtags and per-hashtag post listings.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use super::hashtags::{normalize_tag, related_hashtags, trending_hashtags, TrendingTag};
use super::pagination::{paginate, OutOfRange, Page};
use crate::config::{Config, MAX_WINDOW_DAYS};
use crate::domain::entities::Post;
use crate::domain::ports::PostRepository;
use crate::error::AppError;

/// Posts per hashtag page
pub const HASHTAG_PAGE_SIZE: usize = 15;

/// Related tags shown next to a hashtag listing
pub const RELATED_LIMIT: usize = 5;

/// Trending tags over public posts from the last `window_days`
pub async fn load_trending<PR: PostRepository>(
    posts: &PR,
    window_days: i64,
    limit: usize,
) -> Result<Vec<TrendingTag>, AppError> {
    let since = Utc::now() - Duration::days(window_days.clamp(1, MAX_WINDOW_DAYS));
    let recent = posts.find_public_with_hashtags_since(since).await?;
    let trending = trending_hashtags(&recent, limit);
    tracing::debug!(
        posts = recent.len(),
        tags = trending.len(),
        "computed trending hashtags"
    );
    Ok(trending)
}

/// A page of posts for one hashtag
#[derive(Debug, Clone, Serialize)]
pub struct HashtagPage {
    /// Normalized tag, lowercase without `#`
    pub tag: String,
    pub posts: Page<Post>,
    pub related: Vec<String>,
}

pub struct ExploreService<PR>
where
    PR: PostRepository,
{
    posts: Arc<PR>,
    trending_window_days: i64,
    trending_limit: usize,
}

impl<PR> ExploreService<PR>
where
    PR: PostRepository,
{
    pub fn new(posts: Arc<PR>, config: &Config) -> Self {
        Self {
            posts,
            trending_window_days: config.trending_window_days,
            trending_limit: config.trending_limit,
        }
    }

    /// Trending hashtags; `limit` falls back to the configured default
    pub async fn trending(&self, limit: Option<usize>) -> Result<Vec<TrendingTag>, AppError> {
        let limit = limit.unwrap_or(self.trending_limit);
        load_trending(self.posts.as_ref(), self.trending_window_days, limit).await
    }

    /// Public posts tagged with `raw_tag`, newest first, with related tags
    pub async fn hashtag_posts(
        &self,
        raw_tag: &str,
        page: Option<&str>,
    ) -> Result<HashtagPage, AppError> {
        let tag = normalize_tag(raw_tag);
        if tag.is_empty() {
            return Err(AppError::BadRequest("Hashtag must not be empty".to_string()));
        }

        let posts = self.posts.find_public_by_hashtag(&tag).await?;
        let related = related_hashtags(&posts, &tag, RELATED_LIMIT);
        let posts = paginate(posts, page, HASHTAG_PAGE_SIZE, OutOfRange::LastPage);

        Ok(HashtagPage {
            tag,
            posts,
            related,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Privacy;
    use crate::test_utils::{test_post_with_content, InMemoryPostRepository};

    fn create_service(posts: InMemoryPostRepository) -> ExploreService<InMemoryPostRepository> {
        ExploreService::new(Arc::new(posts), &Config::default())
    }

    #[tokio::test]
    async fn trending_ignores_old_and_private_posts() {
        let mut old = test_post_with_content("#Throwback #Goa");
        old.created_at = Utc::now() - Duration::days(10);
        let mut private = test_post_with_content("#Secret");
        private.privacy = Privacy::Private;

        let service = create_service(
            InMemoryPostRepository::new()
                .with_post(test_post_with_content("Sunset #Goa #Beach"))
                .with_post(test_post_with_content("#Goa again"))
                .with_post(old)
                .with_post(private),
        );

        let trending = service.trending(None).await.unwrap();
        assert_eq!(trending[0].name, "Goa");
        assert_eq!(trending[0].count, 2);
        assert!(trending.iter().all(|t| t.name != "Secret" && t.name != "Throwback"));
        // Two distinct tags seen, so the defaults pad the list out
        assert!(trending.iter().any(|t| t.name == "Mumbai"));
    }

    #[tokio::test]
    async fn oversized_window_is_clamped() {
        let posts = InMemoryPostRepository::new().with_post(test_post_with_content("#Holi"));
        let trending = load_trending(&posts, i64::MAX, 10).await.unwrap();
        assert_eq!(trending[0].name, "Holi");

        let trending = load_trending(&posts, -1, 10).await.unwrap();
        assert_eq!(trending[0].name, "Holi");
    }

    #[tokio::test]
    async fn trending_honors_limit() {
        let service = create_service(InMemoryPostRepository::new());
        let trending = service.trending(Some(2)).await.unwrap();
        assert_eq!(trending.len(), 2);
    }

    #[tokio::test]
    async fn hashtag_posts_normalizes_and_relates() {
        let service = create_service(
            InMemoryPostRepository::new()
                .with_post(test_post_with_content("Match day #Cricket #IPL"))
                .with_post(test_post_with_content("#cricket in the rain #Mumbai #IPL"))
                .with_post(test_post_with_content("Just #Food")),
        );

        let page = service.hashtag_posts(" #CRICKET", None).await.unwrap();
        assert_eq!(page.tag, "cricket");
        assert_eq!(page.posts.total_items, 2);
        assert_eq!(page.related, vec!["IPL", "Mumbai"]);
    }

    #[tokio::test]
    async fn hashtag_posts_pages_by_fifteen() {
        let posts = (0..20).map(|i| test_post_with_content(&format!("Day {} #Diwali", i)));
        let service = create_service(InMemoryPostRepository::new().with_posts(posts));

        let first = service.hashtag_posts("diwali", None).await.unwrap();
        assert_eq!(first.posts.items.len(), 15);
        assert_eq!(first.posts.num_pages, 2);

        let past_end = service.hashtag_posts("diwali", Some("7")).await.unwrap();
        assert_eq!(past_end.posts.number, 2);
        assert_eq!(past_end.posts.items.len(), 5);
    }

    #[tokio::test]
    async fn empty_hashtag_is_bad_request() {
        let service = create_service(InMemoryPostRepository::new());
        let result = service.hashtag_posts(" # ", None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
