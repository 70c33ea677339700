//! Persistence state of an order.

use serde::{Deserialize, Serialize};

/// Where an order sits in its storage lifecycle.
///
/// State transitions:
/// ```text
/// Transient ──save (≥1 line)──► Persisted ──save──► Persisted
///                                   │
///                                   └──delete──► (gone)
/// ```
///
/// There is no partially persisted state: a save either stores the whole
/// aggregate or leaves the order `Transient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderState {
    /// Not yet saved; the order id is 0.
    #[default]
    Transient,

    /// Saved at least once; header and lines exist in storage.
    Persisted,
}

impl OrderState {
    /// Returns true if the next save inserts a new order row.
    pub fn is_transient(&self) -> bool {
        matches!(self, OrderState::Transient)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Transient => "Transient",
            OrderState::Persisted => "Persisted",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_transient() {
        assert_eq!(OrderState::default(), OrderState::Transient);
        assert!(OrderState::Transient.is_transient());
        assert!(!OrderState::Persisted.is_transient());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(OrderState::Transient.to_string(), "Transient");
        assert_eq!(OrderState::Persisted.to_string(), "Persisted");
    }
}
