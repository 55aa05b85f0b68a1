//! # Persistent Store
//!
//! The store is an external collaborator: this crate only calls it. The
//! `Store` trait exposes get-by-key, query-by-secondary-index, scan, put and
//! delete. `MemoryStore` is the in-process backend used by default and in
//! tests.

pub mod backend;
pub mod errors;
pub mod memory;

pub use backend::{decode, encode, Store, Table};
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
