//! PostgreSQL adapter for PostRepository
//!
//! Post rows are loaded first, then their authors and media in one query
//! each, and stitched together in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use uuid::Uuid;

use crate::domain::entities::{
    split_hashtags, MediaType, Post, PostId, PostMedia, Privacy, UserId,
};
use crate::domain::ports::PostRepository;
use crate::entity::{post_media, posts, users};
use crate::error::DomainError;

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    db: DatabaseConnection,
}

impl PostgresPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run a post query and attach authors and media to the rows
    async fn load(&self, query: Select<posts::Entity>) -> Result<Vec<Post>, DomainError> {
        let rows = query
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let author_ids: Vec<Uuid> = rows.iter().map(|r| r.author_id).collect();

        let authors: HashMap<Uuid, String> = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .column(users::Column::Username)
            .filter(users::Column::Id.is_in(author_ids))
            .into_tuple::<(Uuid, String)>()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .collect();

        let media_rows = post_media::Entity::find()
            .filter(post_media::Column::PostId.is_in(post_ids))
            .order_by_asc(post_media::Column::Order)
            .order_by_asc(post_media::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut media: HashMap<Uuid, Vec<PostMedia>> = HashMap::new();
        for row in media_rows {
            let post_id = row.post_id;
            match PostMedia::try_from(row) {
                Ok(m) => media.entry(post_id).or_default().push(m),
                Err(e) => tracing::warn!(%post_id, "Skipping media row: {}", e),
            }
        }

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let post_id = row.id;
                let author = authors.get(&row.author_id).cloned().unwrap_or_default();
                let attached = media.remove(&row.id).unwrap_or_default();
                match to_post(row, author, attached) {
                    Ok(post) => Some(post),
                    Err(e) => {
                        tracing::warn!(%post_id, "Skipping post row: {}", e);
                        None
                    }
                }
            })
            .collect())
    }
}

/// `LIKE` pattern matching `needle` anywhere, with wildcards escaped
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_feed_candidates(
        &self,
        author_ids: &[UserId],
        limit: u64,
    ) -> Result<Vec<Post>, DomainError> {
        let ids: Vec<Uuid> = author_ids.iter().map(|id| id.0).collect();
        let query = posts::Entity::find()
            .filter(
                Condition::any()
                    .add(posts::Column::AuthorId.is_in(ids))
                    .add(posts::Column::Privacy.eq(Privacy::Public.to_string())),
            )
            .order_by_desc(posts::Column::CreatedAt)
            .limit(limit);

        self.load(query).await
    }

    async fn find_public_with_hashtags_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        let query = posts::Entity::find()
            .filter(posts::Column::Privacy.eq(Privacy::Public.to_string()))
            .filter(posts::Column::CreatedAt.gte(since.fixed_offset()))
            .filter(posts::Column::Hashtags.ne(""))
            .order_by_desc(posts::Column::CreatedAt);

        self.load(query).await
    }

    async fn find_public_by_hashtag(&self, tag: &str) -> Result<Vec<Post>, DomainError> {
        let query = posts::Entity::find()
            .filter(posts::Column::Privacy.eq(Privacy::Public.to_string()))
            .filter(
                Expr::expr(Func::lower(Expr::col(posts::Column::Hashtags)))
                    .like(contains_pattern(&tag.to_lowercase())),
            )
            .order_by_desc(posts::Column::CreatedAt);

        self.load(query).await
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        let query = posts::Entity::find()
            .filter(posts::Column::CreatedAt.between(start.fixed_offset(), end.fixed_offset()))
            .order_by_desc(posts::Column::CreatedAt);

        self.load(query).await
    }

    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();
        let query = posts::Entity::find().filter(posts::Column::Id.is_in(ids));

        self.load(query).await
    }
}

/// Fails on an unreadable privacy value; such rows are never shown
fn to_post(
    model: posts::Model,
    author_username: String,
    media: Vec<PostMedia>,
) -> Result<Post, String> {
    let privacy: Privacy = model.privacy.parse()?;
    Ok(Post {
        id: PostId(model.id),
        author_id: UserId(model.author_id),
        author_username,
        content: model.content,
        privacy,
        location: model.location,
        hashtags: split_hashtags(&model.hashtags),
        likes_count: model.likes_count,
        comments_count: model.comments_count,
        shares_count: model.shares_count,
        views_count: model.views_count,
        is_pinned: model.is_pinned,
        created_at: model.created_at.with_timezone(&Utc),
        media,
    })
}

/// Convert SeaORM model to domain entity
impl TryFrom<post_media::Model> for PostMedia {
    type Error = String;

    fn try_from(model: post_media::Model) -> Result<Self, Self::Error> {
        let media_type: MediaType = model.media_type.parse()?;
        Ok(PostMedia {
            id: model.id,
            media_type,
            file: model.file,
            caption: model.caption,
            order: model.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_row(privacy: &str) -> posts::Model {
        posts::Model {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "Chai time #Pune".to_string(),
            privacy: privacy.to_string(),
            location: String::new(),
            hashtags: "Pune".to_string(),
            likes_count: 3,
            comments_count: 1,
            shares_count: 0,
            views_count: 9,
            is_pinned: false,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn to_post_reads_privacy() {
        let post = to_post(post_row("Friends"), "asha".to_string(), Vec::new()).unwrap();
        assert_eq!(post.privacy, Privacy::Friends);
        assert_eq!(post.author_username, "asha");
        assert_eq!(post.hashtags, vec!["Pune"]);
    }

    #[test]
    fn unreadable_privacy_is_rejected() {
        assert!(to_post(post_row("everyone"), "asha".to_string(), Vec::new()).is_err());
        assert!(to_post(post_row(""), "asha".to_string(), Vec::new()).is_err());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("cricket"), "%cricket%");
        assert_eq!(contains_pattern("desi_food"), "%desi\\_food%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
    }
}
