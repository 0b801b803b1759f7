//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use uuid::Uuid;

use crate::app::hashtags::extract_hashtags;
use crate::domain::entities::{
    AdminRole, AdminStatus, AdminUser, AdminUserId, ContentKind, FlaggedContentType, MediaType,
    ModerationId, ModerationItem, ModerationStatus, Post, PostId, PostMedia, Privacy, Severity,
    User, UserId,
};

/// Create an active test user with a specific username
pub fn test_user(username: &str) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        username: username.to_string(),
        email: format!("{}@example.in", username),
        phone_number: None,
        first_name: String::new(),
        last_name: String::new(),
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        is_active: true,
        session_token_hash: Some(format!("hash-{}", username)),
        created_at: Utc::now(),
    }
}

fn test_media(media_type: MediaType) -> PostMedia {
    PostMedia {
        id: 1,
        media_type,
        file: format!("posts/media/test.{}", match media_type {
            MediaType::Image => "jpg",
            MediaType::Video => "mp4",
        }),
        caption: String::new(),
        order: 0,
    }
}

/// Create a public post whose attached media makes it the given kind
pub fn test_post(kind: ContentKind) -> Post {
    let media = match kind {
        ContentKind::Video => vec![test_media(MediaType::Video)],
        ContentKind::Image => vec![test_media(MediaType::Image)],
        ContentKind::Text => Vec::new(),
    };
    Post {
        id: PostId(Uuid::new_v4()),
        author_id: UserId(Uuid::new_v4()),
        author_username: "test-author".to_string(),
        content: "Namaste from Pune".to_string(),
        privacy: Privacy::Public,
        location: String::new(),
        hashtags: Vec::new(),
        likes_count: 0,
        comments_count: 0,
        shares_count: 0,
        views_count: 0,
        is_pinned: false,
        created_at: Utc::now(),
        media,
    }
}

/// Create a text post with hashtags taken from its content
pub fn test_post_with_content(content: &str) -> Post {
    Post {
        content: content.to_string(),
        hashtags: extract_hashtags(content),
        ..test_post(ContentKind::Text)
    }
}

/// Create a text post written by `author`
pub fn test_post_by(author: &User) -> Post {
    Post {
        author_id: author.id,
        author_username: author.username.clone(),
        ..test_post(ContentKind::Text)
    }
}

/// Create an active admin with the given role
pub fn test_admin(role: AdminRole) -> AdminUser {
    AdminUser {
        id: AdminUserId(Uuid::new_v4()),
        username: format!("{}-admin", role),
        email: format!("{}@admin.example.in", role),
        role,
        status: AdminStatus::Active,
        session_token_hash: Some(format!("admin-hash-{}", role)),
    }
}

/// Create a pending moderation record for a post
pub fn test_moderation_item(severity: Severity, post_id: Option<PostId>) -> ModerationItem {
    ModerationItem {
        id: ModerationId(Uuid::new_v4()),
        content_type: FlaggedContentType::Post,
        content_id: post_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        post_id,
        user_id: UserId(Uuid::new_v4()),
        status: ModerationStatus::Pending,
        severity,
        flag_reason: "spam".to_string(),
        content_preview: String::new(),
        auto_flagged: false,
        flagged_at: Utc::now(),
        reviewed_at: None,
    }
}
