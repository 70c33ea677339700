//! SQLite-backed persistence for the point-of-sale order store.
//!
//! - `Database` owns the single connection every store shares
//! - `CatalogStore` handles menu items
//! - `OrderStore` saves and deletes order aggregates atomically
//! - `TransactionIdGenerator` issues date-scoped transaction ids

pub mod bootstrap;
pub mod catalog;
pub mod database;
pub mod error;
pub mod orders;
pub mod transaction_id;

pub use bootstrap::{bootstrap, sample_menu};
pub use catalog::CatalogStore;
pub use database::Database;
pub use error::{ErrorKind, Result, StoreError};
pub use orders::OrderStore;
pub use transaction_id::{TransactionCounter, TransactionIdGenerator};
