//! Request authentication
//!
//! Bearer session tokens resolve to a `Viewer` on user routes and to an
//! `AdminUser` on admin panel routes.

mod session;

pub use session::{admin_auth_middleware, hash_session_token, user_auth_middleware};
