//! Line item quantity.
//!
//! A quantity is always at least 1. Every constructor clamps instead of
//! failing, so user input and stored data can never produce an empty line.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A line item quantity, always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest valid quantity.
    pub const ONE: Self = Self(1);

    /// Create a quantity, clamping zero up to 1.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self::ONE } else { Self(value) }
    }

    /// Create a quantity from a signed value, clamping anything below 1 to 1.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        if value < 1 {
            return Self::ONE;
        }
        Self(u32::try_from(value).unwrap_or(u32::MAX))
    }

    /// Parse user-entered text.
    ///
    /// Missing, empty, or non-numeric input yields 1. Fractional input is
    /// truncated toward zero before clamping, so `"2.7"` is 2 and `"0.5"` is 1.
    #[must_use]
    pub fn parse_lenient(input: Option<&str>) -> Self {
        let Some(text) = input.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::ONE;
        };

        if let Ok(whole) = text.parse::<i64>() {
            return Self::clamped(whole);
        }

        match text.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation)] // saturating float-to-int cast
            Ok(value) if value.is_finite() => Self::clamped(value.trunc() as i64),
            _ => Self::ONE,
        }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// This quantity plus one.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_raises_non_positive_to_one() {
        assert_eq!(Quantity::clamped(0), Quantity::ONE);
        assert_eq!(Quantity::clamped(-5), Quantity::ONE);
        assert_eq!(Quantity::clamped(i64::MIN), Quantity::ONE);
        assert_eq!(Quantity::clamped(4).get(), 4);
    }

    #[test]
    fn test_new_clamps_zero() {
        assert_eq!(Quantity::new(0), Quantity::ONE);
        assert_eq!(Quantity::new(3).get(), 3);
    }

    #[test]
    fn test_parse_lenient_defaults_to_one() {
        assert_eq!(Quantity::parse_lenient(None), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(Some("")), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(Some("   ")), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(Some("abc")), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(Some("NaN")), Quantity::ONE);
    }

    #[test]
    fn test_parse_lenient_numbers() {
        assert_eq!(Quantity::parse_lenient(Some("5")).get(), 5);
        assert_eq!(Quantity::parse_lenient(Some(" 12 ")).get(), 12);
        assert_eq!(Quantity::parse_lenient(Some("2.7")).get(), 2);
        assert_eq!(Quantity::parse_lenient(Some("0.5")), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(Some("-3")), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(Some("0")), Quantity::ONE);
    }

    #[test]
    fn test_deserialize_clamps() {
        let q: Quantity = serde_json::from_str("0").unwrap();
        assert_eq!(q, Quantity::ONE);
        let q: Quantity = serde_json::from_str("-2").unwrap();
        assert_eq!(q, Quantity::ONE);
        let q: Quantity = serde_json::from_str("6").unwrap();
        assert_eq!(q.get(), 6);
    }

    #[test]
    fn test_incremented() {
        assert_eq!(Quantity::ONE.incremented().get(), 2);
        assert_eq!(Quantity::new(u32::MAX).incremented().get(), u32::MAX);
    }
}
