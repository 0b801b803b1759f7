//! SeaORM entities
//!
//! Table models for the PostgreSQL schema. Domain code works with the types in
//! `domain::entities`; the adapters convert between the two.

pub mod admin_users;
pub mod follows;
pub mod moderated_content;
pub mod post_media;
pub mod posts;
pub mod users;
