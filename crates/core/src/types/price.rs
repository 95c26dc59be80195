//! Non-negative price type backed by decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount was negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A catalog price in the store currency's standard unit.
///
/// The non-negative invariant is enforced at construction and at
/// deserialization, so a `Price` received from the remote catalog is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
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

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_zero_and_positive() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
        assert!(Price::new(Decimal::new(999, 2)).is_ok());
    }

    #[test]
    fn test_new_rejects_negative() {
        let negative = Decimal::new(-1, 2);
        assert_eq!(Price::new(negative), Err(PriceError::Negative(negative)));
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::new(Decimal::new(5, 0)).unwrap().to_string(), "$5.00");
        assert_eq!(Price::new(Decimal::new(999, 2)).unwrap().to_string(), "$9.99");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(999, 2));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("-1.50");
        assert!(result.is_err());
    }
}
