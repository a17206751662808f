//! Account status filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use orghub_core::types::{FilterField, FilterOp, FilterValue};

use super::fields;

/// Account status as shown in user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// The account may act.
    Active,
    /// The account is blocked (`is_active == false`).
    Blocked,
}

impl UserStatus {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }

    /// The condition selecting users with this status.
    ///
    /// Records without `is_active` load as active, so `Active` matches
    /// anything that is not explicitly `false`.
    pub fn condition(&self) -> FilterField {
        match self {
            Self::Active => {
                FilterField::new(fields::IS_ACTIVE, FilterOp::Ne, FilterValue::Boolean(false))
            }
            Self::Blocked => FilterField::eq_bool(fields::IS_ACTIVE, false),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = orghub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            _ => Err(orghub_core::AppError::validation(format!(
                "Invalid user status: '{s}'. Expected one of: active, blocked"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status() {
        assert_eq!("Blocked".parse::<UserStatus>().unwrap(), UserStatus::Blocked);
        assert!("suspended".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_active_matches_records_without_flag() {
        let legacy = json!({"email": "a@example.com"});
        let blocked = json!({"email": "b@example.com", "is_active": false});
        let (Some(legacy), Some(blocked)) = (legacy.as_object(), blocked.as_object()) else {
            unreachable!()
        };
        assert!(UserStatus::Active.condition().matches(legacy));
        assert!(!UserStatus::Active.condition().matches(blocked));
        assert!(UserStatus::Blocked.condition().matches(blocked));
    }
}
