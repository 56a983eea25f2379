//! Fixed-point money amounts.

use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
///
/// Prices, subtotals and totals use this type on both the in-memory and the
/// persisted side, so a total survives a write/read round trip unchanged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new Money amount from a whole number of currency units.
    pub fn from_units(units: i32) -> Self {
        Self(i64::from(units) * 100)
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity. Returns `None` on overflow.
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }

    /// Adds two amounts. Returns `None` on overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Multiplies by a quantity, clamping at the numeric bounds.
    pub fn saturating_mul(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Sums amounts, clamping at the numeric bounds instead of wrapping.
///
/// Use [`Money::checked_add`] where an overflow must be reported.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_units_scales_to_cents() {
        assert_eq!(Money::from_units(35).cents(), 3500);
    }

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-12.34");
    }

    #[test]
    fn multiply_and_sum() {
        let subtotals = [
            Money::from_units(10).checked_mul(2).unwrap(),
            Money::from_units(5).checked_mul(3).unwrap(),
        ];
        let total: Money = subtotals.into_iter().sum();
        assert_eq!(total, Money::from_units(35));
    }

    #[test]
    fn from_units_covers_the_whole_unit_range() {
        assert_eq!(Money::from_units(i32::MAX).cents(), i64::from(i32::MAX) * 100);
        assert_eq!(Money::from_units(i32::MIN).cents(), i64::from(i32::MIN) * 100);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let half = Money::from_cents(i64::MAX / 2);
        assert_eq!(half.checked_mul(3), None);
        assert_eq!(
            half.checked_mul(2),
            Some(Money::from_cents(i64::MAX - 1))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
    }

    #[test]
    fn saturating_operations_never_wrap() {
        assert_eq!(
            Money::from_cents(i64::MAX / 2).saturating_mul(3),
            Money::from_cents(i64::MAX)
        );
        let total: Money = [Money::from_cents(i64::MAX), Money::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(999)).unwrap();
        assert_eq!(json, "999");
    }
}
