//! Feed renderer
//!
//! Renders feeds to a readable markdown-ish text format for clients that do
//! not ask for JSON.

use crate::app::hashtags::strip_hashtags;
use crate::app::{FeedPage, HashtagPage, Page, TrendingTag};
use crate::domain::entities::{ContentKind, Post};

/// Characters of post text shown per feed entry
const SNIPPET_CHARS: usize = 140;

/// Render a feed page
pub fn render_feed(feed: &FeedPage) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("# GupShup Feed for @{}\n\n", feed.viewer));

    if feed.posts.items.is_empty() {
        buf.push_str("_Nothing here yet. Follow people or post something!_\n\n");
    } else {
        for post in &feed.posts.items {
            buf.push_str(&render_post(post));
            buf.push('\n');
        }
        buf.push('\n');
    }

    buf.push_str(&render_page_footer(&feed.posts, "/feed"));

    if !feed.trending.is_empty() {
        buf.push_str("\n---\n\n");
        buf.push_str(&render_trending(&feed.trending));
    }

    buf
}

/// Render the trending hashtag list
pub fn render_trending(trending: &[TrendingTag]) -> String {
    let mut buf = String::from("## Trending\n\n");
    for (i, tag) in trending.iter().enumerate() {
        buf.push_str(&format!(
            "{}. #{} ({} posts) {}\n",
            i + 1,
            tag.name,
            tag.count,
            hashtag_link(&tag.name)
        ));
    }
    buf
}

/// Render one hashtag's post listing
pub fn render_hashtag_page(page: &HashtagPage) -> String {
    let mut buf = format!("# #{}\n\n", page.tag);

    if page.posts.items.is_empty() {
        buf.push_str("_No public posts with this hashtag._\n\n");
    } else {
        for post in &page.posts.items {
            buf.push_str(&render_post(post));
            buf.push('\n');
        }
        buf.push('\n');
    }

    buf.push_str(&render_page_footer(&page.posts, &hashtag_link(&page.tag)));

    if !page.related.is_empty() {
        let related: Vec<String> = page.related.iter().map(|t| format!("#{}", t)).collect();
        buf.push_str(&format!("\nRelated: {}\n", related.join(" ")));
    }

    buf
}

fn render_post(post: &Post) -> String {
    let kind = match post.content_kind() {
        ContentKind::Video => "[VIDEO]",
        ContentKind::Image => "[IMAGE]",
        ContentKind::Text => "[TEXT]",
    };

    let mut line = format!(
        "{} @{} · {}",
        kind,
        post.author_username,
        post.created_at.format("%d %b %H:%M")
    );

    let text = strip_hashtags(&post.content);
    if !text.is_empty() {
        line.push_str(&format!("\n    {}", truncate(&text, SNIPPET_CHARS)));
    }

    if !post.hashtags.is_empty() {
        let tags: Vec<String> = post.hashtags.iter().map(|t| format!("#{}", t)).collect();
        line.push_str(&format!("\n    {}", tags.join(" ")));
    }

    line.push_str(&format!(
        "\n    {} likes | {} comments | {} shares",
        post.likes_count, post.comments_count, post.shares_count
    ));

    format!("{}\n", line)
}

fn render_page_footer<T>(page: &Page<T>, base: &str) -> String {
    let mut buf = format!("Page {} of {}", page.number, page.num_pages);
    if page.has_previous {
        buf.push_str(&format!(" | prev: {}?page={}", base, page.number - 1));
    }
    if page.has_next {
        buf.push_str(&format!(" | next: {}?page={}", base, page.number + 1));
    }
    buf.push('\n');
    buf
}

fn hashtag_link(tag: &str) -> String {
    format!("/hashtags/{}", urlencoding::encode(tag))
}

/// Truncate to `max_chars` characters, ending with `...` when cut
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
