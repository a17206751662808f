//! User repository.

use orghub_core::result::AppResult;
use orghub_core::types::{FilterField, Predicate};
use orghub_entity::user::User;
use orghub_entity::user::fields;

use super::DocumentRepository;

/// Repository for user documents.
pub type UserRepository = DocumentRepository<User>;

impl UserRepository {
    /// Find a user by email, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_first(&Predicate::field(FilterField::ieq(fields::EMAIL, email)))
            .await
    }
}
