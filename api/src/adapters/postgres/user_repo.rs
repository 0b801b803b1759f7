//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::domain::entities::{FollowStatus, User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::{follows, users};
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: users::Column, value: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_session_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        self.find_one(users::Column::SessionTokenHash, hash).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one(users::Column::Username, username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one(users::Column::Email, email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.find_one(users::Column::PhoneNumber, phone).await
    }

    async fn find_following_ids(&self, id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let ids: Vec<uuid::Uuid> = follows::Entity::find()
            .select_only()
            .column(follows::Column::FollowingId)
            .filter(follows::Column::FollowerId.eq(id.0))
            .filter(follows::Column::Status.eq(FollowStatus::Accepted.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(ids.into_iter().map(UserId).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            username: model.username,
            email: model.email,
            phone_number: model.phone_number,
            first_name: model.first_name,
            last_name: model.last_name,
            city: model.city,
            state: model.state,
            is_active: model.is_active,
            session_token_hash: model.session_token_hash,
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
