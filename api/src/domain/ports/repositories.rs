//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    AdminUser, ModerationFilter, ModerationItem, Post, PostId, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by the SHA-256 hash of their session token
    async fn find_by_session_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized phone number (`+91XXXXXXXXXX`)
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// IDs of the users this user follows with an accepted follow
    async fn find_following_ids(&self, id: &UserId) -> Result<Vec<UserId>, DomainError>;
}

/// Repository for Post entities. Every returned post has its media attached.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts written by any of `author_ids` or marked public, newest first
    async fn find_feed_candidates(
        &self,
        author_ids: &[UserId],
        limit: u64,
    ) -> Result<Vec<Post>, DomainError>;

    /// Public posts created at or after `since` that carry at least one hashtag
    async fn find_public_with_hashtags_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError>;

    /// Public posts whose hashtag column contains `tag` (case-insensitive), newest first
    async fn find_public_by_hashtag(&self, tag: &str) -> Result<Vec<Post>, DomainError>;

    /// Posts of any privacy created within `[start, end]`
    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError>;

    /// Look up posts by ID; missing IDs are skipped
    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, DomainError>;
}

/// Repository for admin panel accounts
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find an admin by the SHA-256 hash of their session token
    async fn find_by_session_hash(&self, hash: &str) -> Result<Option<AdminUser>, DomainError>;
}

/// Repository for the moderation queue
#[async_trait]
pub trait ModerationRepository: Send + Sync {
    /// All moderation records matching the filter, in no particular order
    async fn find_matching(
        &self,
        filter: &ModerationFilter,
    ) -> Result<Vec<ModerationItem>, DomainError>;
}
