//! PostgreSQL adapter for ModerationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::{
    FlaggedContentType, ModerationFilter, ModerationId, ModerationItem, ModerationStatus, PostId,
    Severity, UserId,
};
use crate::domain::ports::ModerationRepository;
use crate::entity::moderated_content;
use crate::error::DomainError;

/// PostgreSQL implementation of ModerationRepository
pub struct PostgresModerationRepository {
    db: DatabaseConnection,
}

impl PostgresModerationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ModerationRepository for PostgresModerationRepository {
    async fn find_matching(
        &self,
        filter: &ModerationFilter,
    ) -> Result<Vec<ModerationItem>, DomainError> {
        let mut query = moderated_content::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(moderated_content::Column::Status.eq(status.to_string()));
        }
        if let Some(content_type) = filter.content_type {
            query =
                query.filter(moderated_content::Column::ContentType.eq(content_type.to_string()));
        }
        if let Some(severity) = filter.severity {
            query = query.filter(moderated_content::Column::Severity.eq(severity.to_string()));
        }

        let results = query
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut items = Vec::with_capacity(results.len());
        for model in results {
            match ModerationItem::try_from(model) {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!("Skipping unreadable moderation row: {}", e),
            }
        }
        Ok(items)
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<moderated_content::Model> for ModerationItem {
    type Error = String;

    fn try_from(model: moderated_content::Model) -> Result<Self, Self::Error> {
        let content_type: FlaggedContentType = model.content_type.parse()?;
        let status: ModerationStatus = model.status.parse()?;

        Ok(ModerationItem {
            id: ModerationId(model.id),
            content_type,
            content_id: model.object_id,
            post_id: model.post_id.map(PostId),
            user_id: UserId(model.user_id),
            status,
            severity: Severity::from_stored(&model.severity),
            flag_reason: model.flag_reason,
            content_preview: model.content_preview,
            auto_flagged: model.auto_flagged,
            flagged_at: model.flagged_at.with_timezone(&Utc),
            reviewed_at: model.reviewed_at.map(|dt| dt.with_timezone(&Utc)),
        })
    }
}
