//! Order aggregate and related types.

mod aggregate;
mod line;
mod state;
mod value_objects;

pub use aggregate::{Order, OrderSummary};
pub use line::OrderLine;
pub use state::OrderState;
pub use value_objects::{Money, ParseMoneyError, TransactionId};
