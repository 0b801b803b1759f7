//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod admin_repo;
pub mod moderation_repo;
pub mod post_repo;
pub mod user_repo;


pub use admin_repo::PostgresAdminRepository;
pub use moderation_repo::PostgresModerationRepository;
pub use post_repo::PostgresPostRepository;
pub use user_repo::PostgresUserRepository;
