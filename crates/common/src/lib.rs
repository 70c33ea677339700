//! Shared identifier types for the point-of-sale order store.

pub mod types;

pub use types::{ItemId, LineId, OrderId};
