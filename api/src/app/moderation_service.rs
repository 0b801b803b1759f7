//! Moderation queue service
//!
//! Reads flagged content for the admin panel, most urgent first, with a
//! preview of each flagged post.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::pagination::{paginate, OutOfRange, Page};
use crate::domain::entities::{
    Access, AdminModule, AdminUser, FlaggedContentType, ModerationFilter, ModerationItem,
    ModerationStatus, PostId, Severity, UserId,
};
use crate::domain::ports::{ModerationRepository, PostRepository};
use crate::error::{AppError, DomainError};

pub const DEFAULT_PER_PAGE: usize = 20;
pub const MAX_PER_PAGE: usize = 100;

/// Characters of post content shown in a preview
const PREVIEW_CHARS: usize = 200;

const MISSING_CONTENT: &str = "[Content no longer exists]";
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Raw query parameters for the queue; `all` disables a filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
    pub content_type: Option<String>,
    pub severity: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl QueueQuery {
    fn filter(&self) -> Result<ModerationFilter, DomainError> {
        Ok(ModerationFilter {
            status: parse_filter::<ModerationStatus>(self.status.as_deref().or(Some("pending")))?,
            content_type: parse_filter::<FlaggedContentType>(self.content_type.as_deref())?,
            severity: parse_filter::<Severity>(self.severity.as_deref())?,
        })
    }

    fn per_page(&self) -> usize {
        self.per_page
            .as_deref()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }
}

fn parse_filter<T>(raw: Option<&str>) -> Result<Option<T>, DomainError>
where
    T: std::str::FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(DomainError::Validation),
    }
}

/// A queue item with its current content preview
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    #[serde(flatten)]
    pub item: ModerationItem,
    pub preview: String,
    pub author: Option<String>,
    pub author_id: Option<UserId>,
}

/// Cut `content` to the preview length, marking the cut with `...`
pub fn preview_text(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let cut: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}

/// Queue order: severity rank, then most recently flagged
pub fn sort_queue(items: &mut [ModerationItem]) {
    items.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| b.flagged_at.cmp(&a.flagged_at))
    });
}

pub struct ModerationService<MR, PR>
where
    MR: ModerationRepository,
    PR: PostRepository,
{
    moderation: Arc<MR>,
    posts: Arc<PR>,
}

impl<MR, PR> ModerationService<MR, PR>
where
    MR: ModerationRepository,
    PR: PostRepository,
{
    pub fn new(moderation: Arc<MR>, posts: Arc<PR>) -> Self {
        Self { moderation, posts }
    }

    /// One page of the moderation queue for `admin`
    pub async fn queue(
        &self,
        admin: &AdminUser,
        query: &QueueQuery,
    ) -> Result<Page<QueueEntry>, AppError> {
        if !admin.has_permission(AdminModule::Moderation, Access::Read) {
            tracing::warn!(admin = %admin.username, role = %admin.role, "moderation queue denied");
            return Err(AppError::Forbidden);
        }

        let filter = query.filter()?;
        let mut items = self.moderation.find_matching(&filter).await?;
        sort_queue(&mut items);

        let page = paginate(
            items,
            query.page.as_deref(),
            query.per_page(),
            OutOfRange::FirstPage,
        );

        let post_ids: Vec<PostId> = page
            .items
            .iter()
            .filter(|i| i.content_type == FlaggedContentType::Post)
            .filter_map(|i| i.post_id)
            .collect();
        let posts: HashMap<PostId, (String, String, UserId)> = if post_ids.is_empty() {
            HashMap::new()
        } else {
            self.posts
                .find_by_ids(&post_ids)
                .await?
                .into_iter()
                .map(|p| (p.id, (p.content, p.author_username, p.author_id)))
                .collect()
        };

        tracing::debug!(
            total = page.total_items,
            page = page.number,
            previews = posts.len(),
            "read moderation queue"
        );

        Ok(page.map(|item| {
            if item.content_type != FlaggedContentType::Post {
                return QueueEntry {
                    preview: item.content_preview.clone(),
                    item,
                    author: None,
                    author_id: None,
                };
            }
            match item.post_id.and_then(|id| posts.get(&id)) {
                Some((content, author, author_id)) => QueueEntry {
                    preview: preview_text(content),
                    author: Some(author.clone()),
                    author_id: Some(*author_id),
                    item,
                },
                None => QueueEntry {
                    preview: MISSING_CONTENT.to_string(),
                    author: Some(UNKNOWN_AUTHOR.to_string()),
                    author_id: None,
                    item,
                },
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::entities::{AdminRole, AdminStatus, ContentKind};
    use crate::test_utils::{
        test_admin, test_moderation_item, test_post, InMemoryModerationRepository,
        InMemoryPostRepository,
    };

    fn create_service(
        moderation: InMemoryModerationRepository,
        posts: InMemoryPostRepository,
    ) -> ModerationService<InMemoryModerationRepository, InMemoryPostRepository> {
        ModerationService::new(Arc::new(moderation), Arc::new(posts))
    }

    fn flagged(severity: Severity, minutes_ago: i64) -> ModerationItem {
        let mut item = test_moderation_item(severity, None);
        item.flagged_at = Utc::now() - Duration::minutes(minutes_ago);
        item
    }

    #[test]
    fn preview_truncates_long_content() {
        let long = "अ".repeat(250);
        let preview = preview_text(&long);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));

        let exact = "a".repeat(200);
        assert_eq!(preview_text(&exact), exact);
    }

    #[test]
    fn queue_sorts_by_severity_then_newest() {
        let mut items = vec![
            flagged(Severity::Low, 1),
            flagged(Severity::Critical, 30),
            flagged(Severity::Unspecified, 0),
            flagged(Severity::Critical, 5),
            flagged(Severity::High, 10),
        ];
        sort_queue(&mut items);

        let order: Vec<_> = items.iter().map(|i| i.severity).collect();
        assert_eq!(
            order,
            vec![
                Severity::Critical,
                Severity::Critical,
                Severity::High,
                Severity::Low,
                Severity::Unspecified
            ]
        );
        assert!(items[0].flagged_at > items[1].flagged_at);
    }

    #[tokio::test]
    async fn queue_requires_moderation_read() {
        let service = create_service(
            InMemoryModerationRepository::new(),
            InMemoryPostRepository::new(),
        );

        let analyst = test_admin(AdminRole::Analyst);
        let result = service.queue(&analyst, &QueueQuery::default()).await;
        assert!(matches!(result, Err(AppError::Forbidden)));

        let mut suspended = test_admin(AdminRole::Moderator);
        suspended.status = AdminStatus::Suspended;
        let result = service.queue(&suspended, &QueueQuery::default()).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn queue_defaults_to_pending() {
        let mut approved = flagged(Severity::Critical, 1);
        approved.status = ModerationStatus::Approved;
        let pending = flagged(Severity::Low, 1);

        let service = create_service(
            InMemoryModerationRepository::new()
                .with_item(approved)
                .with_item(pending.clone()),
            InMemoryPostRepository::new(),
        );
        let admin = test_admin(AdminRole::Moderator);

        let page = service.queue(&admin, &QueueQuery::default()).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].item.id, pending.id);

        let all = QueueQuery {
            status: Some("all".to_string()),
            ..Default::default()
        };
        let page = service.queue(&admin, &all).await.unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].item.severity, Severity::Critical);
    }

    #[tokio::test]
    async fn invalid_filter_is_validation_error() {
        let service = create_service(
            InMemoryModerationRepository::new(),
            InMemoryPostRepository::new(),
        );
        let query = QueueQuery {
            severity: Some("apocalyptic".to_string()),
            ..Default::default()
        };

        let result = service.queue(&test_admin(AdminRole::Admin), &query).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn previews_come_from_live_posts() {
        let mut post = test_post(ContentKind::Text);
        post.content = "x".repeat(240);
        post.author_username = "troll_99".to_string();

        let live = test_moderation_item(Severity::High, Some(post.id));
        let deleted = test_moderation_item(Severity::Medium, Some(PostId::new()));
        let mut comment = test_moderation_item(Severity::Low, None);
        comment.content_type = FlaggedContentType::Comment;
        comment.content_preview = "rude words".to_string();

        let service = create_service(
            InMemoryModerationRepository::new()
                .with_item(live)
                .with_item(deleted)
                .with_item(comment),
            InMemoryPostRepository::new().with_post(post.clone()),
        );

        let page = service
            .queue(&test_admin(AdminRole::SuperAdmin), &QueueQuery::default())
            .await
            .unwrap();

        assert_eq!(page.items[0].preview, format!("{}...", "x".repeat(200)));
        assert_eq!(page.items[0].author.as_deref(), Some("troll_99"));
        assert_eq!(page.items[0].author_id, Some(post.author_id));

        assert_eq!(page.items[1].preview, "[Content no longer exists]");
        assert_eq!(page.items[1].author.as_deref(), Some("Unknown"));

        assert_eq!(page.items[2].preview, "rude words");
        assert_eq!(page.items[2].author, None);
    }

    #[tokio::test]
    async fn per_page_is_capped_and_bad_pages_go_to_first() {
        let mut moderation = InMemoryModerationRepository::new();
        for i in 0..120 {
            moderation = moderation.with_item(flagged(Severity::Medium, i));
        }
        let service = create_service(moderation, InMemoryPostRepository::new());
        let admin = test_admin(AdminRole::Admin);

        let query = QueueQuery {
            per_page: Some("500".to_string()),
            ..Default::default()
        };
        let page = service.queue(&admin, &query).await.unwrap();
        assert_eq!(page.per_page, 100);
        assert_eq!(page.num_pages, 2);

        let query = QueueQuery {
            page: Some("9".to_string()),
            ..Default::default()
        };
        let page = service.queue(&admin, &query).await.unwrap();
        assert_eq!(page.per_page, 20);
        assert_eq!(page.number, 1);
    }
}
