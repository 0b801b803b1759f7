//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod admin;
pub mod moderation;
pub mod post;
pub mod user;

pub use admin::{Access, AdminModule, AdminRole, AdminStatus, AdminUser, AdminUserId};
pub use moderation::{
    FlaggedContentType, ModerationFilter, ModerationId, ModerationItem, ModerationStatus, Severity,
};
pub use post::{split_hashtags, ContentKind, MediaType, Post, PostId, PostMedia, Privacy};
pub use user::{FollowStatus, User, UserId, Viewer};
