//! Core type definitions used across the OrgHub workspace.

pub mod document;
pub mod filter;
pub mod id;
pub mod kind;

pub use document::{Document, ID_FIELD};
pub use filter::{FilterField, FilterOp, FilterValue, Predicate};
pub use id::*;
pub use kind::ResourceKind;
