//! Holding repository.

use orghub_core::result::AppResult;
use orghub_core::types::{CompanyId, FilterField, HoldingId, ID_FIELD, Predicate};
use orghub_entity::org::Holding;
use orghub_entity::org::fields;

use super::DocumentRepository;

/// Repository for holding documents.
pub type HoldingRepository = DocumentRepository<Holding>;

impl HoldingRepository {
    /// Find a holding that is not soft-deleted.
    pub async fn find_active(&self, id: &HoldingId) -> AppResult<Option<Holding>> {
        Ok(self
            .find_by_id(id.as_str())
            .await?
            .filter(|holding| !holding.is_deleted))
    }

    /// A live holding whose name equals `name` ignoring case.
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude: Option<&HoldingId>,
    ) -> AppResult<Option<Holding>> {
        let mut predicate = Predicate::field(FilterField::ieq(fields::NAME, name))
            .and(FilterField::eq_bool(fields::IS_DELETED, false));
        if let Some(exclude) = exclude {
            predicate = predicate.and(FilterField::ne(ID_FIELD, exclude.as_str()));
        }
        self.find_first(&predicate).await
    }

    /// Register a company in the holding's `company_ids` mirror set.
    pub async fn link_company(&self, id: &HoldingId, company: &CompanyId) -> AppResult<bool> {
        self.add_to_set(id.as_str(), fields::COMPANY_IDS, company.as_str())
            .await
    }

    /// Drop a company from the holding's `company_ids` mirror set.
    pub async fn unlink_company(&self, id: &HoldingId, company: &CompanyId) -> AppResult<bool> {
        self.remove_from_set(id.as_str(), fields::COMPANY_IDS, company.as_str())
            .await
    }
}
