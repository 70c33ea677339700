//! Value objects for the order domain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents (e.g., 150 = $1.50)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> i64 {
        (self.cents % 100).abs()
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity, or `None` if the result does not fit.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Money::from_cents)
    }

    /// Adds another amount, or `None` if the result does not fit.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Sums amounts, or `None` if any partial sum does not fit.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

/// Error returned when a decimal amount cannot be read as two-decimal money.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid amount: {0:?} (expected a decimal with at most two fraction digits)")]
pub struct ParseMoneyError(String);

impl std::str::FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `"1.50"`, `"2"`, `"-0.05"` or `"$1.85"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_string());
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(err());
        }
        if fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| err())? * 10,
            _ => fraction.parse().map_err(|_| err())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(err)?;
        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }
}

/// Human-readable, date-scoped order reference such as `OD-20251112-0001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Fixed leading tag of every transaction identifier.
    pub const TAG: &'static str = "OD";

    /// Formats the identifier for `date` and the 1-based `sequence`.
    ///
    /// The sequence is zero-padded to four digits and widens past 9999.
    pub fn for_date(date: NaiveDate, sequence: u64) -> Self {
        Self(format!("{}-{sequence:04}", Self::date_prefix(date)))
    }

    /// Returns the `OD-YYYYMMDD` prefix shared by all identifiers of `date`.
    pub fn date_prefix(date: NaiveDate) -> String {
        format!("{}-{}", Self::TAG, date.format("%Y%m%d"))
    }

    /// Wraps an identifier read back from storage.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no identifier has been assigned.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
        assert_eq!(money.dollars(), 12);
        assert_eq!(money.cents_part(), 34);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(150).to_string(), "$1.50");
        assert_eq!(Money::from_cents(100).to_string(), "$1.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("1.50".parse::<Money>().unwrap().cents(), 150);
        assert_eq!("1.5".parse::<Money>().unwrap().cents(), 150);
        assert_eq!("2".parse::<Money>().unwrap().cents(), 200);
        assert_eq!("$1.85".parse::<Money>().unwrap().cents(), 185);
        assert_eq!(".05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("-0.05".parse::<Money>().unwrap().cents(), -5);
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("1.505".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(150);
        let c = Money::from_cents(185);

        assert_eq!(a.checked_multiply(2), Some(Money::from_cents(300)));
        assert_eq!(
            a.checked_multiply(2).and_then(|m| m.checked_add(c)),
            Some(Money::from_cents(485))
        );
        assert_eq!(Money::checked_sum([a, a, c]), Some(Money::from_cents(485)));
        assert_eq!(Money::checked_sum([]), Some(Money::zero()));
    }

    #[test]
    fn test_money_overflow_is_reported() {
        let huge = Money::from_cents(3_000_000_000);
        assert_eq!(huge.checked_multiply(u32::MAX), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]),
            None
        );
    }

    #[test]
    fn test_money_display_extremes() {
        assert_eq!(Money::from_cents(i64::MIN).cents_part(), 8);
        assert!(Money::from_cents(i64::MIN).to_string().starts_with("-$"));
    }

    #[test]
    fn test_transaction_id_format() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
        assert_eq!(TransactionId::date_prefix(date), "OD-20251112");
        assert_eq!(
            TransactionId::for_date(date, 1).as_str(),
            "OD-20251112-0001"
        );
        assert_eq!(
            TransactionId::for_date(date, 42).as_str(),
            "OD-20251112-0042"
        );
    }

    #[test]
    fn test_transaction_id_widens_past_four_digits() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(
            TransactionId::for_date(date, 10_000).as_str(),
            "OD-20250102-10000"
        );
    }

    #[test]
    fn test_transaction_id_empty() {
        assert!(TransactionId::new("").is_empty());
        assert!(!TransactionId::from("OD-20250102-0001").is_empty());
    }
}
