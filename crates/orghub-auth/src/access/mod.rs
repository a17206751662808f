//! Scope-derived access control.
//!
//! [`AccessFilterEngine`] turns a [`Scope`](crate::Scope) into listing
//! predicates (`filter`) and authorizes single resources before mutations
//! (`validate_access`).

pub mod engine;
pub mod predicate;

pub use engine::{AccessFilterEngine, AccessHints};
