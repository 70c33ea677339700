//! Catalog record for a sellable item.

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::{Money, ValidationError};

/// A sellable item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Storage-assigned identifier, `ItemId::UNSAVED` until inserted.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Free-form description.
    pub description: String,
}

impl MenuItem {
    /// Creates an item that has not been inserted yet.
    pub fn new(name: impl Into<String>, price: Money, description: impl Into<String>) -> Self {
        Self {
            id: ItemId::UNSAVED,
            name: name.into(),
            price,
            description: description.into(),
        }
    }

    /// Builds an item from a stored row.
    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }

    /// Checks the fields the catalog requires before a write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.price.is_negative() {
            return Err(ValidationError::NegativePrice { price: self.price });
        }
        Ok(())
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_unsaved() {
        let item = MenuItem::new("Glazed Donut", Money::from_cents(150), "Classic glazed donut");
        assert!(!item.id.is_persisted());
        assert!(item.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let item = MenuItem::new("   ", Money::from_cents(150), "");
        assert_eq!(item.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn negative_price_is_rejected() {
        let item = MenuItem::new("Refund", Money::from_cents(-1), "");
        assert_eq!(
            item.validate(),
            Err(ValidationError::NegativePrice {
                price: Money::from_cents(-1)
            })
        );
    }

    #[test]
    fn free_item_is_allowed() {
        let item = MenuItem::new("Water", Money::zero(), "Tap water");
        assert!(item.validate().is_ok());
    }

    #[test]
    fn display_shows_name_and_price() {
        let item = MenuItem::new("Sprinkles", Money::from_cents(185), "Fun colorful sprinkles");
        assert_eq!(item.to_string(), "Sprinkles ($1.85)");
    }
}
