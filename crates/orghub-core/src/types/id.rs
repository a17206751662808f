//! Newtype wrappers around opaque 24-character hex identifiers.
//!
//! Every document in the store is keyed by an object-id style string: a
//! 4-byte big-endian creation timestamp followed by 8 random bytes, rendered
//! as lowercase hex. Distinct types prevent passing a `CompanyId` where a
//! `DepartmentId` is expected. Parsing validates the format so malformed ids
//! are rejected before any store lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Length of an identifier in hex characters.
pub const ID_LEN: usize = 24;

/// Returns `true` when `value` is a well-formed identifier.
pub fn is_valid_id(value: &str) -> bool {
    value.len() == ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Generate a fresh identifier string.
fn generate() -> String {
    let timestamp = chrono::Utc::now().timestamp() as u32;
    let random: u64 = rand::random();
    format!("{timestamp:08x}{random:016x}")
}

/// Macro to define a newtype ID wrapper around a validated hex string.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new() -> Self {
                Self(generate())
            }

            /// Parse and validate an identifier.
            ///
            /// Returns a validation error naming the offending field when the
            /// value is not a 24-character hex string.
            pub fn parse(value: &str) -> Result<Self, AppError> {
                if is_valid_id(value) {
                    Ok(Self(value.to_ascii_lowercase()))
                } else {
                    Err(AppError::validation(format!(
                        "Invalid {} format: {value}",
                        $label
                    )))
                }
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a holding.
    HoldingId, "holding_id"
);

define_id!(
    /// Unique identifier for a company.
    CompanyId, "company_id"
);

define_id!(
    /// Unique identifier for a department.
    DepartmentId, "department_id"
);

define_id!(
    /// Unique identifier for a user.
    UserId, "user_id"
);

define_id!(
    /// Unique identifier for a folder.
    FolderId, "folder_id"
);

define_id!(
    /// Unique identifier for a file.
    FileId, "file_id"
);
