//! Admin user domain entity
//!
//! Admin panel accounts and the role permission matrix that gates the
//! moderation and analytics endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an admin user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminUserId(pub Uuid);

impl From<Uuid> for AdminUserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AdminUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Moderator,
    Analyst,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::SuperAdmin => write!(f, "super_admin"),
            AdminRole::Admin => write!(f, "admin"),
            AdminRole::Moderator => write!(f, "moderator"),
            AdminRole::Analyst => write!(f, "analyst"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "admin" => Ok(AdminRole::Admin),
            "moderator" => Ok(AdminRole::Moderator),
            "analyst" => Ok(AdminRole::Analyst),
            _ => Err(format!("Unknown admin role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Active,
    Inactive,
    Suspended,
    Locked,
}

impl std::fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminStatus::Active => write!(f, "active"),
            AdminStatus::Inactive => write!(f, "inactive"),
            AdminStatus::Suspended => write!(f, "suspended"),
            AdminStatus::Locked => write!(f, "locked"),
        }
    }
}

impl std::str::FromStr for AdminStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AdminStatus::Active),
            "inactive" => Ok(AdminStatus::Inactive),
            "suspended" => Ok(AdminStatus::Suspended),
            "locked" => Ok(AdminStatus::Locked),
            _ => Err(format!("Unknown admin status: {}", s)),
        }
    }
}

/// Admin panel area a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminModule {
    Users,
    Posts,
    Moderation,
    Reports,
    Settings,
    Audit,
    Security,
    System,
    BulkActions,
}

impl std::fmt::Display for AdminModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AdminModule::Users => "users",
            AdminModule::Posts => "posts",
            AdminModule::Moderation => "moderation",
            AdminModule::Reports => "reports",
            AdminModule::Settings => "settings",
            AdminModule::Audit => "audit",
            AdminModule::Security => "security",
            AdminModule::System => "system",
            AdminModule::BulkActions => "bulk_actions",
        };
        write!(f, "{}", name)
    }
}

/// Access level within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Write,
    Delete,
    Admin,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
            Access::Delete => write!(f, "delete"),
            Access::Admin => write!(f, "admin"),
        }
    }
}

const FULL: &[Access] = &[Access::Read, Access::Write, Access::Delete, Access::Admin];
const RWD: &[Access] = &[Access::Read, Access::Write, Access::Delete];
const RW: &[Access] = &[Access::Read, Access::Write];
const R: &[Access] = &[Access::Read];
const NONE: &[Access] = &[];

impl AdminRole {
    /// Access levels this role holds on a module
    pub fn grants(&self, module: AdminModule) -> &'static [Access] {
        use AdminModule::*;

        match self {
            AdminRole::SuperAdmin => FULL,
            AdminRole::Admin => match module {
                Users | Posts | Moderation => RWD,
                Reports | Settings | BulkActions => RW,
                Audit | Security | System => R,
            },
            AdminRole::Moderator => match module {
                Posts | Moderation => RWD,
                Users => RW,
                Reports | Settings | System | BulkActions => R,
                Audit | Security => NONE,
            },
            AdminRole::Analyst => match module {
                Reports => R,
                _ => NONE,
            },
        }
    }
}

/// An admin panel account, used as the authenticated principal on admin routes
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub status: AdminStatus,
    #[serde(skip_serializing)]
    pub session_token_hash: Option<String>,
}

impl AdminUser {
    pub fn is_active(&self) -> bool {
        self.status == AdminStatus::Active
    }

    /// Only active admins hold permissions.
    pub fn has_permission(&self, module: AdminModule, access: Access) -> bool {
        self.is_active() && self.role.grants(module).contains(&access)
    }
}
