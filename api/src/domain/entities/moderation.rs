//! Moderation domain entity
//!
//! Flagged content awaiting an administrator decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PostId, UserId};

/// Unique identifier for a moderation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModerationId(pub Uuid);

impl From<Uuid> for ModerationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ModerationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of content was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlaggedContentType {
    Post,
    Comment,
    UserProfile,
    Image,
    Video,
}

impl std::fmt::Display for FlaggedContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlaggedContentType::Post => write!(f, "post"),
            FlaggedContentType::Comment => write!(f, "comment"),
            FlaggedContentType::UserProfile => write!(f, "user_profile"),
            FlaggedContentType::Image => write!(f, "image"),
            FlaggedContentType::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for FlaggedContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" => Ok(FlaggedContentType::Post),
            "comment" => Ok(FlaggedContentType::Comment),
            "user_profile" => Ok(FlaggedContentType::UserProfile),
            "image" => Ok(FlaggedContentType::Image),
            "video" => Ok(FlaggedContentType::Video),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
    Escalated,
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationStatus::Pending => write!(f, "pending"),
            ModerationStatus::Approved => write!(f, "approved"),
            ModerationStatus::Rejected => write!(f, "rejected"),
            ModerationStatus::Flagged => write!(f, "flagged"),
            ModerationStatus::Escalated => write!(f, "escalated"),
        }
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            "flagged" => Ok(ModerationStatus::Flagged),
            "escalated" => Ok(ModerationStatus::Escalated),
            _ => Err(format!("Unknown moderation status: {}", s)),
        }
    }
}

/// How urgent a flagged item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    /// Stored value outside the known levels
    Unspecified,
}

impl Severity {
    /// Queue position rank; lower is reviewed first.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 1,
            Severity::High => 2,
            Severity::Medium => 3,
            Severity::Low => 4,
            Severity::Unspecified => 5,
        }
    }

    /// Parse a stored column value, mapping anything unknown to `Unspecified`
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(Severity::Unspecified)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
            Severity::Unspecified => write!(f, "unspecified"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A flagged item in the moderation queue
#[derive(Debug, Clone, Serialize)]
pub struct ModerationItem {
    pub id: ModerationId,
    pub content_type: FlaggedContentType,
    pub content_id: String,
    pub post_id: Option<PostId>,
    pub user_id: UserId,
    pub status: ModerationStatus,
    pub severity: Severity,
    pub flag_reason: String,
    /// Preview captured when the item was flagged
    pub content_preview: String,
    pub auto_flagged: bool,
    pub flagged_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Filters for reading the moderation queue. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct ModerationFilter {
    pub status: Option<ModerationStatus>,
    pub content_type: Option<FlaggedContentType>,
    pub severity: Option<Severity>,
}

impl ModerationFilter {
    pub fn matches(&self, item: &ModerationItem) -> bool {
        self.status.map_or(true, |s| item.status == s)
            && self.content_type.map_or(true, |c| item.content_type == c)
            && self.severity.map_or(true, |s| item.severity == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rank_orders_critical_first() {
        assert!(Severity::Critical.rank() < Severity::High.rank());
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
        assert!(Severity::Low.rank() < Severity::Unspecified.rank());
    }

    #[test]
    fn unknown_stored_severity_is_unspecified() {
        assert_eq!(Severity::from_stored("HIGH"), Severity::High);
        assert_eq!(Severity::from_stored("normal"), Severity::Unspecified);
        assert!("normal".parse::<Severity>().is_err());
    }

    #[test]
    fn content_type_from_str() {
        assert_eq!(
            "user_profile".parse::<FlaggedContentType>().unwrap(),
            FlaggedContentType::UserProfile
        );
        assert!("story".parse::<FlaggedContentType>().is_err());
    }
}
