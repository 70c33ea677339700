//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{LineId, OrderId};
use serde::{Deserialize, Serialize};

use crate::{MenuItem, ValidationError};

use super::{Money, OrderLine, OrderState, TransactionId};

/// Order header as stored, without its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub transaction_id: TransactionId,
    pub ordered_at: DateTime<Utc>,
    /// Total as written at save time.
    pub total: Money,
}

/// Order aggregate root: a header plus its lines, persisted as one unit.
///
/// `total` is derived. Every method that touches the lines recomputes it, so
/// `total() == sum(line_total)` holds between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    transaction_id: TransactionId,
    ordered_at: DateTime<Utc>,
    total: Money,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Starts a new, unsaved order.
    pub fn new(transaction_id: impl Into<TransactionId>, ordered_at: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::UNSAVED,
            transaction_id: transaction_id.into(),
            ordered_at,
            total: Money::zero(),
            lines: Vec::new(),
        }
    }

    /// Rebuilds an aggregate from a stored header and its lines.
    ///
    /// The total is recomputed from `lines`, so it can differ from the stored
    /// `summary.total` if catalog prices changed since the order was saved.
    pub fn from_parts(
        summary: OrderSummary,
        lines: Vec<OrderLine>,
    ) -> Result<Self, ValidationError> {
        let total = total_of(&lines)?;
        Ok(Self {
            id: summary.id,
            transaction_id: summary.transaction_id,
            ordered_at: summary.ordered_at,
            total,
            lines,
        })
    }

    /// Adds `quantity` of `item` as a new line.
    pub fn add_item(&mut self, item: MenuItem, quantity: u32) -> Result<(), ValidationError> {
        let line = OrderLine::new(item, quantity)?;
        self.add_line(line)
    }

    /// Appends a line.
    ///
    /// Fails with `AmountOverflow`, leaving the order unchanged, if the new
    /// total does not fit.
    pub fn add_line(&mut self, line: OrderLine) -> Result<(), ValidationError> {
        self.total = self
            .total
            .checked_add(line.line_total())
            .ok_or(ValidationError::AmountOverflow)?;
        self.lines.push(line);
        Ok(())
    }

    /// Removes and returns the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<OrderLine, ValidationError> {
        if index >= self.lines.len() {
            return Err(ValidationError::LineNotFound { index });
        }
        let line = self.lines.remove(index);
        match total_of(&self.lines) {
            Ok(total) => {
                self.total = total;
                Ok(line)
            }
            Err(e) => {
                self.lines.insert(index, line);
                Err(e)
            }
        }
    }

    /// Changes the quantity of the line at `index`.
    ///
    /// On error the order is left unchanged.
    pub fn set_line_quantity(&mut self, index: usize, quantity: u32) -> Result<(), ValidationError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(ValidationError::LineNotFound { index })?;
        let previous = line.clone();
        line.set_quantity(quantity)?;
        match total_of(&self.lines) {
            Ok(total) => {
                self.total = total;
                Ok(())
            }
            Err(e) => {
                self.lines[index] = previous;
                Err(e)
            }
        }
    }

    /// Drops every line.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.total = Money::zero();
    }

    /// Checks the preconditions of a save.
    ///
    /// The empty-order check runs first so an empty order always reports
    /// `NoLines`.
    pub fn validate_for_save(&self) -> Result<(), ValidationError> {
        if self.lines.is_empty() {
            return Err(ValidationError::NoLines);
        }
        if self.transaction_id.is_empty() {
            return Err(ValidationError::MissingTransactionId);
        }
        if let Some(line) = self.lines.iter().find(|l| !l.item().id.is_persisted()) {
            return Err(ValidationError::UnsavedItem {
                name: line.item().name.clone(),
            });
        }
        Ok(())
    }

    /// Records the identifiers assigned by a committed save.
    ///
    /// `line_ids` must be in line order and have one entry per line.
    pub fn mark_saved(&mut self, id: OrderId, line_ids: &[LineId]) {
        debug_assert_eq!(line_ids.len(), self.lines.len());
        self.id = id;
        for (line, line_id) in self.lines.iter_mut().zip(line_ids) {
            line.assign(*line_id, id);
        }
    }
}

fn total_of(lines: &[OrderLine]) -> Result<Money, ValidationError> {
    Money::checked_sum(lines.iter().map(OrderLine::line_total))
        .ok_or(ValidationError::AmountOverflow)
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn ordered_at(&self) -> DateTime<Utc> {
        self.ordered_at
    }

    /// Returns the sum of all line totals.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the next save creates or replaces the stored order.
    pub fn state(&self) -> OrderState {
        if self.id.is_persisted() {
            OrderState::Persisted
        } else {
            OrderState::Transient
        }
    }

    /// Returns the header view of this order.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            id: self.id,
            transaction_id: self.transaction_id.clone(),
            ordered_at: self.ordered_at,
            total: self.total,
        }
    }
}
