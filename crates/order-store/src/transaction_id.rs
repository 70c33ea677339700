use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use domain::TransactionId;

use crate::Result;

/// Source of the number of orders already issued under a transaction-id prefix.
#[async_trait]
pub trait TransactionCounter: Send + Sync {
    /// Counts stored orders whose transaction id starts with `prefix`.
    async fn count_with_prefix(&self, prefix: &str) -> Result<u64>;
}

/// Issues `OD-YYYYMMDD-NNNN` transaction ids.
///
/// The sequence is derived from a live count, not a stored counter, so it
/// survives restarts but two concurrent callers can draw the same id. The
/// unique constraint on `orders.transaction_id` rejects the second save.
#[derive(Debug, Clone)]
pub struct TransactionIdGenerator<C> {
    counter: C,
}

impl<C: TransactionCounter> TransactionIdGenerator<C> {
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Returns the next id for today's local date.
    pub async fn next_transaction_id(&self) -> Result<TransactionId> {
        self.next_for_date(Local::now().date_naive()).await
    }

    /// Returns the next id for `date`.
    #[tracing::instrument(skip(self))]
    pub async fn next_for_date(&self, date: NaiveDate) -> Result<TransactionId> {
        let prefix = TransactionId::date_prefix(date);
        let existing = self.counter.count_with_prefix(&prefix).await?;
        let id = TransactionId::for_date(date, existing + 1);
        tracing::debug!(%id, existing, "transaction id issued");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCounter(u64);

    #[async_trait]
    impl TransactionCounter for FixedCounter {
        async fn count_with_prefix(&self, _prefix: &str) -> Result<u64> {
            Ok(self.0)
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 12).unwrap()
    }

    #[tokio::test]
    async fn first_order_of_the_day_is_0001() {
        let generator = TransactionIdGenerator::new(FixedCounter(0));
        let id = generator.next_for_date(date()).await.unwrap();
        assert_eq!(id.as_str(), "OD-20251112-0001");
    }

    #[tokio::test]
    async fn sequence_follows_existing_count() {
        let generator = TransactionIdGenerator::new(FixedCounter(41));
        let id = generator.next_for_date(date()).await.unwrap();
        assert_eq!(id.as_str(), "OD-20251112-0042");
    }

    #[tokio::test]
    async fn sequence_widens_instead_of_wrapping() {
        let generator = TransactionIdGenerator::new(FixedCounter(9_999));
        let id = generator.next_for_date(date()).await.unwrap();
        assert_eq!(id.as_str(), "OD-20251112-10000");
    }

    #[tokio::test]
    async fn today_uses_local_date() {
        let generator = TransactionIdGenerator::new(FixedCounter(0));
        let id = generator.next_transaction_id().await.unwrap();
        let prefix = TransactionId::date_prefix(Local::now().date_naive());
        assert!(id.as_str().starts_with(&prefix));
    }
}
