//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Action;
use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    /// Full access, including adding, editing and deleting products
    #[serde(rename = "admin")]
    Admin,
    /// Read-only access to the inventory
    #[serde(rename = "user")]
    Standard,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role satisfies a required role
    pub fn can_access(&self, required: UserRole) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Standard => matches!(required, UserRole::Standard),
        }
    }

    /// Check the capability table for an action
    pub fn permits(&self, action: Action) -> bool {
        self.can_access(action.required_role())
    }

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Standard => ROLE_USER,
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_USER => Ok(UserRole::Standard),
            other => Err(DomainError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the user's role permits an action
    pub fn can(&self, action: Action) -> bool {
        self.role.permits(action)
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i32,
    /// Login name
    pub username: String,
    /// User role
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_storage_value() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::Standard);
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(String::from(UserRole::Standard), "user");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("root".parse::<UserRole>().is_err());
        assert!("Admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_admin_can_access_everything() {
        assert!(UserRole::Admin.can_access(UserRole::Admin));
        assert!(UserRole::Admin.can_access(UserRole::Standard));
        assert!(UserRole::Standard.can_access(UserRole::Standard));
        assert!(!UserRole::Standard.can_access(UserRole::Admin));
    }

    #[test]
    fn test_serialization_hides_password_hash() {
        let user = User {
            id: 1,
            username: "admin".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"admin\""));

        let response = UserResponse::from(&user);
        assert_eq!(response.username, "admin");
        assert_eq!(response.role, UserRole::Admin);
    }
}
