//! Domain layer for the point-of-sale order store.
//!
//! This crate provides the in-memory model the stores persist:
//! - `MenuItem` catalog records
//! - `Order` aggregate with its `OrderLine`s and derived total
//! - `Money` and `TransactionId` value objects
//! - `ValidationError` for precondition failures

pub mod error;
pub mod menu;
pub mod order;

pub use common::{ItemId, LineId, OrderId};
pub use error::ValidationError;
pub use menu::MenuItem;
pub use order::{
    Money, Order, OrderLine, OrderState, OrderSummary, ParseMoneyError, TransactionId,
};
