//! A single (item, quantity) entry of an order.

use common::{LineId, OrderId};
use serde::{Deserialize, Serialize};

use crate::{MenuItem, ValidationError};

use super::Money;

/// One line of an order.
///
/// The menu item is a copy taken when the line is created, not a live
/// reference into the catalog. The line total always equals
/// `item.price * quantity`.
///
/// Deserialization goes through [`OrderLine::from_row`]: a serialized
/// `line_total` is ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredLine")]
pub struct OrderLine {
    id: LineId,
    order_id: OrderId,
    item: MenuItem,
    quantity: u32,
    line_total: Money,
}

/// Serialized shape of a line, before its total is derived.
#[derive(Deserialize)]
struct StoredLine {
    #[serde(default)]
    id: LineId,
    #[serde(default)]
    order_id: OrderId,
    item: MenuItem,
    quantity: u32,
}

impl TryFrom<StoredLine> for OrderLine {
    type Error = ValidationError;

    fn try_from(stored: StoredLine) -> Result<Self, Self::Error> {
        Self::from_row(stored.id, stored.order_id, stored.item, stored.quantity)
    }
}

impl OrderLine {
    /// Creates a new, unsaved line.
    pub fn new(item: MenuItem, quantity: u32) -> Result<Self, ValidationError> {
        Self::from_row(LineId::UNSAVED, OrderId::UNSAVED, item, quantity)
    }

    /// Rebuilds a line from stored columns.
    pub fn from_row(
        id: LineId,
        order_id: OrderId,
        item: MenuItem,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let line_total = line_total(&item, quantity)?;
        Ok(Self {
            id,
            order_id,
            item,
            quantity,
            line_total,
        })
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// Changes the quantity and recomputes the line total.
    ///
    /// On error the line is left as it was.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        self.line_total = line_total(&self.item, quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub(crate) fn assign(&mut self, id: LineId, order_id: OrderId) {
        self.id = id;
        self.order_id = order_id;
    }
}

fn line_total(item: &MenuItem, quantity: u32) -> Result<Money, ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::InvalidQuantity { quantity });
    }
    item.price
        .checked_multiply(quantity)
        .ok_or(ValidationError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glazed() -> MenuItem {
        MenuItem::with_id(
            common::ItemId::new(1),
            "Glazed Donut",
            Money::from_cents(150),
            "Classic glazed donut",
        )
    }

    fn cake() -> MenuItem {
        MenuItem::with_id(
            common::ItemId::new(2),
            "Wedding Cake",
            Money::from_cents(3_000_000_000),
            "",
        )
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        let line = OrderLine::new(glazed(), 3).unwrap();
        assert_eq!(line.line_total().cents(), 450);
        assert_eq!(line.id(), LineId::UNSAVED);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert_eq!(
            OrderLine::new(glazed(), 0),
            Err(ValidationError::InvalidQuantity { quantity: 0 })
        );
    }

    #[test]
    fn changing_quantity_recomputes_total() {
        let mut line = OrderLine::new(glazed(), 1).unwrap();
        line.set_quantity(4).unwrap();
        assert_eq!(line.quantity(), 4);
        assert_eq!(line.line_total().cents(), 600);

        assert!(line.set_quantity(0).is_err());
        assert_eq!(line.quantity(), 4);
    }

    #[test]
    fn line_keeps_its_own_item_copy() {
        let mut item = glazed();
        let line = OrderLine::new(item.clone(), 2).unwrap();
        item.price = Money::from_cents(999);
        assert_eq!(line.item().price.cents(), 150);
        assert_eq!(line.line_total().cents(), 300);
    }

    #[test]
    fn overflowing_line_total_is_rejected() {
        assert_eq!(
            OrderLine::new(cake(), u32::MAX),
            Err(ValidationError::AmountOverflow)
        );
    }

    #[test]
    fn overflowing_quantity_change_leaves_line_alone() {
        let mut line = OrderLine::new(cake(), 2).unwrap();
        assert_eq!(
            line.set_quantity(u32::MAX),
            Err(ValidationError::AmountOverflow)
        );
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.line_total().cents(), 6_000_000_000);
    }

    #[test]
    fn deserializing_recomputes_line_total() {
        let json = serde_json::json!({
            "id": 7,
            "order_id": 3,
            "item": glazed(),
            "quantity": 2,
            "line_total": 1,
        });
        let line: OrderLine = serde_json::from_value(json).unwrap();
        assert_eq!(line.id(), LineId::new(7));
        assert_eq!(line.order_id(), OrderId::new(3));
        assert_eq!(line.line_total().cents(), 300);
    }

    #[test]
    fn deserializing_rejects_invalid_quantity() {
        let json = serde_json::json!({ "item": glazed(), "quantity": 0 });
        let err = serde_json::from_value::<OrderLine>(json).unwrap_err();
        assert!(err.to_string().contains("must be greater than 0"));

        let json = serde_json::json!({ "item": cake(), "quantity": u32::MAX });
        assert!(serde_json::from_value::<OrderLine>(json).is_err());
    }
}
