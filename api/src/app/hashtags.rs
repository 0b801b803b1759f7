//! Hashtag extraction, trending and related-tag counting
//!
//! Tags are `#` followed by Unicode word characters, so Hindi and English
//! tags both work. Posts store tags comma-joined without the `#`.

use std::sync::OnceLock;

use regex::Regex;

use super::tally::Tally;
use crate::domain::entities::Post;

/// Tags padded into a thin trending list
const FALLBACK_TAGS: [&str; 5] = ["Mumbai", "Delhi", "Bangalore", "India", "Cricket"];

/// Below this many distinct tags the trending list gets padded
const MIN_TRENDING_TAGS: usize = 5;

fn hashtag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// All hashtags in `content`, in order, without the `#`
pub fn extract_hashtags(content: &str) -> Vec<String> {
    hashtag_regex()
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Remove `#tag` tokens and collapse the leftover whitespace
pub fn strip_hashtags(content: &str) -> String {
    let without_tags = hashtag_regex().replace_all(content, "");
    whitespace_regex()
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Normalize a tag taken from a URL or search box: trimmed, lowercase, no `#`
pub fn normalize_tag(raw: &str) -> String {
    let tag = raw.trim().to_lowercase();
    match tag.strip_prefix('#') {
        Some(rest) => rest.to_string(),
        None => tag,
    }
}

/// Whether a post's stored tag column contains `tag`, ignoring case
pub fn post_mentions_tag(post: &Post, tag: &str) -> bool {
    let needle = tag.to_lowercase();
    post.hashtag_string().to_lowercase().contains(&needle)
}

/// A hashtag with its usage count
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TrendingTag {
    pub name: String,
    pub count: usize,
}

/// Count tags across `posts` and return the most used.
///
/// When fewer than five distinct tags were seen, the fallback tags are added
/// with a count of one unless already present (case-insensitively).
pub fn trending_hashtags(posts: &[Post], limit: usize) -> Vec<TrendingTag> {
    let mut tally: Tally<String> = posts
        .iter()
        .flat_map(|p| p.hashtags.iter().cloned())
        .collect();

    if tally.len() < MIN_TRENDING_TAGS {
        let seen: Vec<String> = tally.keys().map(|k| k.to_lowercase()).collect();
        for tag in FALLBACK_TAGS {
            if !seen.contains(&tag.to_lowercase()) {
                tally.add(tag.to_string());
            }
        }
    }

    tally
        .most_common(limit)
        .into_iter()
        .map(|(name, count)| TrendingTag { name, count })
        .collect()
}

/// Tags that appear alongside `tag` in `posts`, most frequent first
pub fn related_hashtags(posts: &[Post], tag: &str, limit: usize) -> Vec<String> {
    let tag = tag.to_lowercase();
    let tally: Tally<String> = posts
        .iter()
        .flat_map(|p| p.hashtags.iter())
        .filter(|t| t.to_lowercase() != tag)
        .cloned()
        .collect();

    tally
        .most_common(limit)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}
