//! Role-based gating for mutations.

pub mod enforcer;

pub use enforcer::RoleEnforcer;
