//! Domain layer
//!
//! Posts, users, admins and moderation records, free of HTTP and database code.
//! - `entities`: domain models and the rules that live on them
//! - `ports`: repository traits implemented by the adapters

pub mod entities;
pub mod ports;
