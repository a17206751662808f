//! Org-hierarchy management and validation.

pub mod service;
pub mod validator;

pub use service::{
    CreateCompanyRequest, CreateDepartmentRequest, CreateHoldingRequest, OrgService,
    UpdateOrgNodeRequest,
};
pub use validator::OrgHierarchyValidator;
