//! Viral content analysis for the admin panel
//!
//! Posts in the 95th engagement percentile of a recent window, plus what
//! they have in common.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use super::tally::Tally;
use crate::config::{Config, MAX_WINDOW_DAYS};
use crate::domain::entities::{Access, AdminModule, AdminUser, Post, PostId};
use crate::domain::ports::PostRepository;
use crate::error::AppError;

/// Most viral posts returned
const VIRAL_LIMIT: usize = 20;
const PEAK_HOURS_LIMIT: usize = 5;
const COMMON_HASHTAGS_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ViralPost {
    pub id: PostId,
    pub content: String,
    pub author: String,
    pub engagement_score: i64,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub hashtags: Vec<String>,
}

impl From<&Post> for ViralPost {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            content: post.content.clone(),
            author: post.author_username.clone(),
            engagement_score: post.engagement_score(),
            likes_count: post.likes_count,
            comments_count: post.comments_count,
            created_at: post.created_at,
            hashtags: post.hashtags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViralPatterns {
    /// `(hour of day in UTC, posts)` pairs, busiest first
    pub peak_posting_hours: Vec<(u32, usize)>,
    pub avg_content_length: i64,
    /// Lowercased tags with how many viral posts used them
    pub common_hashtags_in_viral: Vec<(String, usize)>,
    pub avg_likes: f64,
    pub avg_comments: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViralReport {
    pub days: i64,
    pub viral_posts: Vec<ViralPost>,
    /// Absent when there were no posts in the window
    pub viral_patterns: Option<ViralPatterns>,
    pub viral_threshold: Option<i64>,
}

/// Score at the 95th percentile of `scores`, or `None` when empty
pub fn viral_threshold(scores: &mut [i64]) -> Option<i64> {
    if scores.is_empty() {
        return None;
    }
    scores.sort_unstable();
    let index = (scores.len() as f64 * 0.95) as usize;
    scores.get(index.min(scores.len() - 1)).copied()
}

/// Posts at or above `threshold`, best first; ties go to the newer post
pub fn select_viral(posts: &[Post], threshold: i64) -> Vec<&Post> {
    let mut viral: Vec<&Post> = posts
        .iter()
        .filter(|p| p.engagement_score() >= threshold)
        .collect();
    viral.sort_by(|a, b| {
        b.engagement_score()
            .cmp(&a.engagement_score())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    viral.truncate(VIRAL_LIMIT);
    viral
}

/// Shared traits of a set of viral posts
pub fn analyze_patterns(viral: &[&Post]) -> Option<ViralPatterns> {
    if viral.is_empty() {
        return None;
    }
    let n = viral.len() as f64;

    let hours: Tally<u32> = viral.iter().map(|p| p.created_at.hour()).collect();
    let tags: Tally<String> = viral
        .iter()
        .flat_map(|p| p.hashtags.iter())
        .map(|t| t.trim().to_lowercase())
        .collect();

    let total_chars: usize = viral.iter().map(|p| p.content.chars().count()).sum();
    let total_likes: i64 = viral.iter().map(|p| i64::from(p.likes_count)).sum();
    let total_comments: i64 = viral.iter().map(|p| i64::from(p.comments_count)).sum();

    Some(ViralPatterns {
        peak_posting_hours: hours.most_common(PEAK_HOURS_LIMIT),
        avg_content_length: (total_chars as f64 / n).round_ties_even() as i64,
        common_hashtags_in_viral: tags.most_common(COMMON_HASHTAGS_LIMIT),
        avg_likes: total_likes as f64 / n,
        avg_comments: total_comments as f64 / n,
    })
}

pub struct AnalyticsService<PR>
where
    PR: PostRepository,
{
    posts: Arc<PR>,
    default_days: i64,
    cache_ttl: StdDuration,
    /// Reports by window length, with the time they were computed
    cache: RwLock<HashMap<i64, (Instant, ViralReport)>>,
}

impl<PR> AnalyticsService<PR>
where
    PR: PostRepository,
{
    pub fn new(posts: Arc<PR>, config: &Config) -> Self {
        Self {
            posts,
            default_days: config.viral_window_days,
            cache_ttl: StdDuration::from_secs(config.viral_cache_ttl_secs),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Viral posts from the last `days` days (default window when `None`)
    pub async fn viral_report(
        &self,
        admin: &AdminUser,
        days: Option<i64>,
    ) -> Result<ViralReport, AppError> {
        if !admin.has_permission(AdminModule::Reports, Access::Read) {
            tracing::warn!(admin = %admin.username, role = %admin.role, "viral report denied");
            return Err(AppError::Forbidden);
        }

        let days = days.unwrap_or(self.default_days);
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }

        if let Some((computed_at, report)) = self.cache.read().await.get(&days) {
            if computed_at.elapsed() < self.cache_ttl {
                return Ok(report.clone());
            }
        }

        let report = self.compute_report(days).await?;
        self.cache
            .write()
            .await
            .insert(days, (Instant::now(), report.clone()));
        Ok(report)
    }

    async fn compute_report(&self, days: i64) -> Result<ViralReport, AppError> {
        let end = Utc::now();
        let start = end - Duration::days(days);
        let posts = self.posts.find_created_between(start, end).await?;

        let mut scores: Vec<i64> = posts.iter().map(Post::engagement_score).collect();
        let Some(threshold) = viral_threshold(&mut scores) else {
            return Ok(ViralReport {
                days,
                viral_posts: Vec::new(),
                viral_patterns: None,
                viral_threshold: None,
            });
        };

        let viral = select_viral(&posts, threshold);
        let viral_patterns = analyze_patterns(&viral);
        tracing::debug!(
            days,
            posts = posts.len(),
            threshold,
            viral = viral.len(),
            "computed viral report"
        );

        Ok(ViralReport {
            days,
            viral_posts: viral.into_iter().map(ViralPost::from).collect(),
            viral_patterns,
            viral_threshold: Some(threshold),
        })
    }
}
