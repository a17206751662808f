//! # orghub-auth
//!
//! Authorization for the OrgHub org hierarchy and knowledge base.
//!
//! ## Modules
//!
//! - `scope`: principal records and their resolution into an immutable `Scope`
//! - `access`: listing predicates per resource kind and point access checks
//! - `rbac`: minimum-role gating for mutations

pub mod access;
pub mod rbac;
pub mod scope;

pub use access::{AccessFilterEngine, AccessHints};
pub use rbac::RoleEnforcer;
pub use scope::{Principal, Scope, ScopeResolver};
