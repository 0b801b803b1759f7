//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::app::hashtags::post_mentions_tag;
use crate::domain::entities::{
    AdminUser, FollowStatus, ModerationFilter, ModerationItem, Post, PostId, Privacy, User, UserId,
};
use crate::domain::ports::{
    AdminRepository, ModerationRepository, PostRepository, UserRepository,
};
use crate::error::DomainError;

/// Sort newest first; equal timestamps keep insertion order
fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    follows: Arc<RwLock<Vec<(UserId, UserId, FollowStatus)>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        {
            let mut users = self.users.write().unwrap();
            users.insert(user.id, user);
        }
        self
    }

    /// Record that `follower` follows `following`
    pub fn with_follow(self, follower: UserId, following: UserId, status: FollowStatus) -> Self {
        {
            let mut follows = self.follows.write().unwrap();
            follows.push((follower, following, status));
        }
        self
    }

    fn find_where(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        let users = self.users.read().unwrap();
        users.values().find(|u| pred(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn find_by_session_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_where(|u| u.session_token_hash.as_deref() == Some(hash)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_where(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_where(|u| u.email == email))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_where(|u| u.phone_number.as_deref() == Some(phone)))
    }

    async fn find_following_ids(&self, id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let follows = self.follows.read().unwrap();
        Ok(follows
            .iter()
            .filter(|(follower, _, status)| follower == id && *status == FollowStatus::Accepted)
            .map(|(_, following, _)| *following)
            .collect())
    }
}

// ============================================================================
// In-Memory Post Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
    pub should_fail: Arc<RwLock<bool>>,
    queries: Arc<AtomicUsize>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(self, post: Post) -> Self {
        {
            let mut posts = self.posts.write().unwrap();
            posts.push(post);
        }
        self
    }

    pub fn with_posts(self, posts: impl IntoIterator<Item = Post>) -> Self {
        {
            let mut stored = self.posts.write().unwrap();
            stored.extend(posts);
        }
        self
    }

    /// Make every query fail with a database error
    pub fn failing(self) -> Self {
        *self.should_fail.write().unwrap() = true;
        self
    }

    /// Number of queries served so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn select(&self, pred: impl Fn(&Post) -> bool) -> Result<Vec<Post>, DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().unwrap() {
            return Err(DomainError::Database("connection refused".to_string()));
        }
        let posts = self.posts.read().unwrap();
        Ok(newest_first(posts.iter().filter(|p| pred(p)).cloned().collect()))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_feed_candidates(
        &self,
        author_ids: &[UserId],
        limit: u64,
    ) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.select(|p| {
            author_ids.contains(&p.author_id) || p.privacy == Privacy::Public
        })?;
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_public_with_hashtags_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        self.select(|p| {
            p.privacy == Privacy::Public && p.created_at >= since && !p.hashtags.is_empty()
        })
    }

    async fn find_public_by_hashtag(&self, tag: &str) -> Result<Vec<Post>, DomainError> {
        self.select(|p| p.privacy == Privacy::Public && post_mentions_tag(p, tag))
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        self.select(|p| p.created_at >= start && p.created_at <= end)
    }

    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, DomainError> {
        self.select(|p| ids.contains(&p.id))
    }
}

// ============================================================================
// In-Memory Admin Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: Arc<RwLock<Vec<AdminUser>>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admin(self, admin: AdminUser) -> Self {
        {
            let mut admins = self.admins.write().unwrap();
            admins.push(admin);
        }
        self
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_session_hash(&self, hash: &str) -> Result<Option<AdminUser>, DomainError> {
        let admins = self.admins.read().unwrap();
        Ok(admins
            .iter()
            .find(|a| a.session_token_hash.as_deref() == Some(hash))
            .cloned())
    }
}

// ============================================================================
// In-Memory Moderation Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryModerationRepository {
    items: Arc<RwLock<Vec<ModerationItem>>>,
}

impl InMemoryModerationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, item: ModerationItem) -> Self {
        {
            let mut items = self.items.write().unwrap();
            items.push(item);
        }
        self
    }
}

#[async_trait]
impl ModerationRepository for InMemoryModerationRepository {
    async fn find_matching(
        &self,
        filter: &ModerationFilter,
    ) -> Result<Vec<ModerationItem>, DomainError> {
        let items = self.items.read().unwrap();
        Ok(items.iter().filter(|i| filter.matches(i)).cloned().collect())
    }
}
