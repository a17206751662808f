//! Core traits defined in `orghub-core` and implemented by other crates.

pub mod store;

pub use store::DocumentStore;
