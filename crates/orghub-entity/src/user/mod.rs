//! User domain entities.

pub mod model;
pub mod role;
pub mod status;

pub use model::{CreateUser, User};
pub use role::UserRole;
pub use status::UserStatus;

/// Field names of user documents.
pub mod fields {
    /// Login email.
    pub const EMAIL: &str = "email";
    /// Stored role string.
    pub const ROLE: &str = "role";
    /// Whether the account may act.
    pub const IS_ACTIVE: &str = "is_active";
}
