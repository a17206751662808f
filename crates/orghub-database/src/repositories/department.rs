//! Department repository.

use orghub_core::result::AppResult;
use orghub_core::types::{CompanyId, DepartmentId, FilterField, ID_FIELD, Predicate};
use orghub_entity::org::Department;
use orghub_entity::org::fields;

use super::DocumentRepository;

/// Repository for department documents.
pub type DepartmentRepository = DocumentRepository<Department>;

impl DepartmentRepository {
    /// Find a department that is not soft-deleted.
    pub async fn find_active(&self, id: &DepartmentId) -> AppResult<Option<Department>> {
        Ok(self
            .find_by_id(id.as_str())
            .await?
            .filter(|department| !department.is_deleted))
    }

    /// A live department under `company_id` whose name equals `name`
    /// ignoring case.
    pub async fn find_by_name(
        &self,
        company_id: &CompanyId,
        name: &str,
        exclude: Option<&DepartmentId>,
    ) -> AppResult<Option<Department>> {
        let mut predicate = Predicate::field(FilterField::eq(fields::COMPANY_ID, company_id.as_str()))
            .and(FilterField::ieq(fields::NAME, name))
            .and(FilterField::eq_bool(fields::IS_DELETED, false));
        if let Some(exclude) = exclude {
            predicate = predicate.and(FilterField::ne(ID_FIELD, exclude.as_str()));
        }
        self.find_first(&predicate).await
    }
}
