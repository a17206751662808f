//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles of the org hierarchy.
///
/// Roles are ordered by reach: Superadmin > Admin > Director > User.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Every holding, company, department, and user.
    Superadmin,
    /// One company, its departments and users.
    Admin,
    /// One department and its users.
    Director,
    /// One department, read-mostly.
    User,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Superadmin => 4,
            Self::Admin => 3,
            Self::Director => 2,
            Self::User => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Whether the role may modify org-hierarchy resources.
    pub fn can_modify(&self) -> bool {
        self.has_at_least(&Self::Director)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Director => "director",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = orghub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "superadmin" => Ok(Self::Superadmin),
            "admin" => Ok(Self::Admin),
            "director" => Ok(Self::Director),
            "user" => Ok(Self::User),
            _ => Err(orghub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: superadmin, admin, director, user"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Superadmin.has_at_least(&UserRole::Admin));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::Director.has_at_least(&UserRole::User));
        assert!(!UserRole::User.has_at_least(&UserRole::Director));
    }

    #[test]
    fn test_can_modify() {
        assert!(UserRole::Director.can_modify());
        assert!(!UserRole::User.can_modify());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("SUPERADMIN".parse::<UserRole>().unwrap(), UserRole::Superadmin);
        assert!("manager".parse::<UserRole>().is_err());
    }
}
