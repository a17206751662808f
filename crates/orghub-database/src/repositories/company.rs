//! Company repository.

use orghub_core::result::AppResult;
use orghub_core::types::{CompanyId, FilterField, HoldingId, ID_FIELD, Predicate};
use orghub_entity::org::Company;
use orghub_entity::org::fields;

use super::DocumentRepository;

/// Repository for company documents.
pub type CompanyRepository = DocumentRepository<Company>;

impl CompanyRepository {
    /// Find a company that is not soft-deleted.
    pub async fn find_active(&self, id: &CompanyId) -> AppResult<Option<Company>> {
        Ok(self
            .find_by_id(id.as_str())
            .await?
            .filter(|company| !company.is_deleted))
    }

    /// A live company under `holding_id` whose name equals `name` ignoring
    /// case.
    pub async fn find_by_name(
        &self,
        holding_id: &HoldingId,
        name: &str,
        exclude: Option<&CompanyId>,
    ) -> AppResult<Option<Company>> {
        let mut predicate = Predicate::field(FilterField::eq(fields::HOLDING_ID, holding_id.as_str()))
            .and(FilterField::ieq(fields::NAME, name))
            .and(FilterField::eq_bool(fields::IS_DELETED, false));
        if let Some(exclude) = exclude {
            predicate = predicate.and(FilterField::ne(ID_FIELD, exclude.as_str()));
        }
        self.find_first(&predicate).await
    }
}
