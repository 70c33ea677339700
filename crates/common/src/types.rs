use serde::{Deserialize, Serialize};

/// Identifier of a catalog (menu) item.
///
/// Storage assigns identifiers on insert; `ItemId::UNSAVED` (0) marks an item
/// that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Identifier carried by an item before its first insert.
    pub const UNSAVED: ItemId = ItemId(0);

    /// Wraps a storage-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns true once storage has assigned this identifier.
    pub fn is_persisted(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier of an order header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Identifier carried by an order until its first save.
    pub const UNSAVED: OrderId = OrderId(0);

    /// Wraps a storage-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns true once the order has been saved.
    pub fn is_persisted(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier of a single order line row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(i64);

impl LineId {
    pub const UNSAVED: LineId = LineId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LineId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_ids_are_not_persisted() {
        assert!(!ItemId::UNSAVED.is_persisted());
        assert!(!OrderId::UNSAVED.is_persisted());
        assert_eq!(ItemId::default(), ItemId::UNSAVED);
        assert_eq!(OrderId::default(), OrderId::UNSAVED);
    }

    #[test]
    fn assigned_ids_are_persisted() {
        assert!(ItemId::new(7).is_persisted());
        assert_eq!(OrderId::from(42).as_i64(), 42);
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&OrderId::new(12)).unwrap();
        assert_eq!(json, "12");
        let id: ItemId = serde_json::from_str("3").unwrap();
        assert_eq!(id, ItemId::new(3));
    }
}
