//! Domain error types.

use thiserror::Error;

use crate::Money;

/// Caller-supplied data that violates a precondition.
///
/// Every variant is detected before any storage call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Menu item name is empty.
    #[error("Menu item name is required")]
    EmptyName,

    /// Menu item price is below zero.
    #[error("Invalid price: {price} (must not be negative)")]
    NegativePrice { price: Money },

    /// Line quantity is zero.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Order has no lines.
    #[error("no items in order")]
    NoLines,

    /// Order is being saved without a transaction identifier.
    #[error("Order has no transaction id")]
    MissingTransactionId,

    /// A line refers to a menu item that was never saved.
    #[error("Menu item '{name}' has not been saved to the catalog")]
    UnsavedItem { name: String },

    /// A line or order total does not fit in the money representation.
    #[error("Amount overflow: total exceeds the largest representable amount")]
    AmountOverflow,

    /// Line index is outside the order.
    #[error("Line not found at position {index}")]
    LineNotFound { index: usize },
}
