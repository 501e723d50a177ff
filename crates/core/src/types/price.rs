//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are non-negative decimal amounts in a single display currency.
//! Catalog prices arrive as JSON numbers (`9.99`); the stored cart writes
//! them back as decimal strings (`"9.99"`) so no precision is lost on the
//! way through storage. Both forms are accepted when reading.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity.get()))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Format for display (e.g., "$19.99"). Half-cents round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Decimal::MAX`].
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::new(Decimal::new(-1, 2)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-1, 2)));
    }

    #[test]
    fn test_zero_price_allowed() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_display_pads_to_two_decimals() {
        assert_eq!(Price::from_cents(1000).unwrap().display(), "$10.00");
        assert_eq!(Price::new(Decimal::new(95, 1)).unwrap().display(), "$9.50");
        assert_eq!(Price::new(Decimal::new(12_345, 3)).unwrap().display(), "$12.35");
    }

    #[test]
    fn test_times_and_sum() {
        let price = Price::from_cents(250).unwrap();
        let total: Price = [price.times(Quantity::new(2)), price]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(750).unwrap());
    }

    #[test]
    fn test_display_rounds_half_cents_up() {
        assert_eq!(Price::new(Decimal::new(5, 3)).unwrap().display(), "$0.01");
        assert_eq!(Price::new(Decimal::new(2_675, 3)).unwrap().display(), "$2.68");
    }

    #[test]
    fn test_huge_totals_saturate() {
        let huge = Price::new(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0)).unwrap();
        let line = huge.times(Quantity::new(u32::MAX));
        assert_eq!(line.amount(), Decimal::MAX);

        let total: Price = [line, line, Price::from_cents(1).unwrap()].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("9.99").unwrap();
        let from_string: Price = serde_json::from_str("\"9.99\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
