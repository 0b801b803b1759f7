//! Account lookup by login identifier
//!
//! Resolves a username, email address or Indian phone number to an active
//! user, trying each candidate lookup in turn.

use std::sync::Arc;

use serde::Serialize;

use super::phone::LoginIdentifier;
use crate::domain::entities::User;
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

/// What other users may see about an account
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub username: String,
    pub display_name: String,
    pub city: String,
    pub state: String,
}

impl From<&User> for PublicProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            display_name: user.display_name(),
            city: user.city.clone(),
            state: user.state.clone(),
        }
    }
}

pub struct AccountService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }

    /// Find the active user an identifier refers to
    pub async fn resolve(&self, identifier: &str) -> Result<User, AppError> {
        let Some(id) = LoginIdentifier::parse(identifier) else {
            return Err(AppError::BadRequest(
                "Identifier must not be empty".to_string(),
            ));
        };

        let mut found = self.users.find_by_username(&id.username).await?;
        if found.is_none() {
            if let Some(email) = &id.email {
                found = self.users.find_by_email(email).await?;
            }
        }
        if found.is_none() {
            if let Some(phone) = &id.phone {
                found = self.users.find_by_phone(phone).await?;
            }
        }

        match found {
            Some(user) if user.is_active => Ok(user),
            Some(user) => {
                tracing::debug!(username = %user.username, "identifier matched inactive user");
                Err(DomainError::NotFound("No active account matches".to_string()).into())
            }
            None => Err(DomainError::NotFound("No active account matches".to_string()).into()),
        }
    }
}
