//! PostgreSQL adapter for AdminRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::{AdminRole, AdminStatus, AdminUser, AdminUserId};
use crate::domain::ports::AdminRepository;
use crate::entity::admin_users;
use crate::error::DomainError;

/// PostgreSQL implementation of AdminRepository
pub struct PostgresAdminRepository {
    db: DatabaseConnection,
}

impl PostgresAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_by_session_hash(&self, hash: &str) -> Result<Option<AdminUser>, DomainError> {
        let result = admin_users::Entity::find()
            .filter(admin_users::Column::SessionTokenHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(AdminUser::try_from).transpose()
    }
}

/// Convert SeaORM model to domain entity. An unknown role is an error, not a default.
impl TryFrom<admin_users::Model> for AdminUser {
    type Error = DomainError;

    fn try_from(model: admin_users::Model) -> Result<Self, Self::Error> {
        let role: AdminRole = model
            .role
            .parse()
            .map_err(DomainError::Internal)?;

        Ok(AdminUser {
            id: AdminUserId(model.id),
            username: model.username,
            email: model.email,
            role,
            status: model.status.parse().unwrap_or(AdminStatus::Inactive),
            session_token_hash: model.session_token_hash,
        })
    }
}
