//! Post domain entity
//!
//! Posts with their attached media. The content kind (video, image or text)
//! is derived from the media and drives feed mixing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who can see a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    Public,
    Friends,
    Private,
}

impl std::fmt::Display for Privacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Privacy::Public => write!(f, "public"),
            Privacy::Friends => write!(f, "friends"),
            Privacy::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for Privacy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Privacy::Public),
            "friends" => Ok(Privacy::Friends),
            "private" => Ok(Privacy::Private),
            _ => Err(format!("Unknown privacy setting: {}", s)),
        }
    }
}

/// Type of an attached media file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            _ => Err(format!("Unknown media type: {}", s)),
        }
    }
}

/// Classification of a post for feed mixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Image,
    Text,
}

impl ContentKind {
    /// A post with any video is a video post; otherwise any image makes it an
    /// image post; no media at all is text-only.
    pub fn classify<'a>(media: impl IntoIterator<Item = &'a MediaType>) -> Self {
        let mut kind = ContentKind::Text;
        for media_type in media {
            match media_type {
                MediaType::Video => return ContentKind::Video,
                MediaType::Image => kind = ContentKind::Image,
            }
        }
        kind
    }

    pub fn is_media(&self) -> bool {
        !matches!(self, ContentKind::Text)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Video => write!(f, "video"),
            ContentKind::Image => write!(f, "image"),
            ContentKind::Text => write!(f, "text"),
        }
    }
}

/// A media file attached to a post
#[derive(Debug, Clone, Serialize)]
pub struct PostMedia {
    pub id: i64,
    pub media_type: MediaType,
    pub file: String,
    pub caption: String,
    pub order: i32,
}

/// A post as read for feeds and analytics
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub author_username: String,
    pub content: String,
    pub privacy: Privacy,
    pub location: String,
    /// Hashtags extracted from the content, without the leading `#`
    pub hashtags: Vec<String>,
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub views_count: i32,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub media: Vec<PostMedia>,
}

impl Post {
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::classify(self.media.iter().map(|m| &m.media_type))
    }

    /// Likes plus comments, recomputed from the row counters on every read.
    pub fn engagement_score(&self) -> i64 {
        i64::from(self.likes_count) + i64::from(self.comments_count)
    }

    /// Hashtags in their stored comma-joined form
    pub fn hashtag_string(&self) -> String {
        self.hashtags.join(",")
    }
}

/// Split a stored comma-joined hashtag column into tags, dropping blanks
pub fn split_hashtags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_prefers_video_over_image() {
        assert_eq!(
            ContentKind::classify(&[MediaType::Image, MediaType::Video]),
            ContentKind::Video
        );
        assert_eq!(
            ContentKind::classify(&[MediaType::Image, MediaType::Image]),
            ContentKind::Image
        );
        assert_eq!(
            ContentKind::classify(std::iter::empty::<&MediaType>()),
            ContentKind::Text
        );
    }

    #[test]
    fn engagement_score_sums_likes_and_comments() {
        let mut post = crate::test_utils::test_post(ContentKind::Text);
        post.likes_count = 12;
        post.comments_count = 5;
        assert_eq!(post.engagement_score(), 17);
    }

    #[test]
    fn split_hashtags_trims_and_drops_empty() {
        assert_eq!(
            split_hashtags(" Mumbai, ,Cricket,"),
            vec!["Mumbai".to_string(), "Cricket".to_string()]
        );
        assert!(split_hashtags("").is_empty());
    }

    #[test]
    fn media_type_from_str() {
        assert_eq!("VIDEO".parse::<MediaType>().unwrap(), MediaType::Video);
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Image);
        assert!("gif".parse::<MediaType>().is_err());
    }
}
