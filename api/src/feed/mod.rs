//! Feed module
//!
//! Plain-text rendering of feeds and hashtag listings.

pub mod renderer;

pub use renderer::{render_feed, render_hashtag_page, render_trending};
