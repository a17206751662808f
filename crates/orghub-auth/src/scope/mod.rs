//! Principal records and the scopes derived from them.

pub mod principal;
pub mod resolver;

pub use principal::{Principal, Scope};
pub use resolver::ScopeResolver;
