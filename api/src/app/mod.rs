//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod account_service;
pub mod analytics_service;
pub mod content_mixer;
pub mod explore_service;
pub mod feed_service;
pub mod hashtags;
pub mod moderation_service;
pub mod pagination;
pub mod phone;
pub mod tally;

pub use account_service::{AccountService, PublicProfile};
pub use analytics_service::{AnalyticsService, ViralReport};
pub use explore_service::{ExploreService, HashtagPage};
pub use feed_service::{FeedPage, FeedService};
pub use hashtags::TrendingTag;
pub use moderation_service::{ModerationService, QueueEntry, QueueQuery};
pub use pagination::Page;
