//! Database module: the shared connection handle and row types.
//!
//! Layout:
//! - `store.rs`: the process-wide `Store` (SQLite pool) and its queries
//! - `models.rs`: Rust structs mirroring DB rows

pub mod models;
pub mod store;

pub use models::{DbCompany, DbContact, DbUser};
pub use store::Store;
