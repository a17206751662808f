//! Org-hierarchy entities: holdings, companies, and departments.
//!
//! All three are soft-deletable; listing paths filter on `is_deleted`.

pub mod company;
pub mod department;
pub mod holding;

pub use company::{Company, CreateCompany};
pub use department::{CreateDepartment, Department};
pub use holding::{CreateHolding, Holding};

/// Field names shared by org-hierarchy documents.
pub mod fields {
    /// Display name, unique per parent ignoring case.
    pub const NAME: &str = "name";
    /// Soft-delete flag.
    pub const IS_DELETED: &str = "is_deleted";
    /// Holding reference on companies.
    pub const HOLDING_ID: &str = "holding_id";
    /// Company reference on departments.
    pub const COMPANY_ID: &str = "company_id";
    /// Mirror of the companies under a holding.
    pub const COMPANY_IDS: &str = "company_ids";
}
