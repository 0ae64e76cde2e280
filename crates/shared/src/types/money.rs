//! Money type with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal`; storage uses whole minor units
//! (hundredths) so that balance arithmetic in SQL stays exact.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single currency every amount in the system is denominated in.
pub const CURRENCY_CODE: &str = "XAF";

/// Number of decimal places kept for every amount.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Errors converting an amount to storage form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// More decimal places than the minor unit allows.
    #[error("amount {0} has more than {MINOR_UNIT_SCALE} decimal places")]
    TooPrecise(Decimal),

    /// Does not fit the storage range.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// A monetary amount in the implied currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Builds an amount from stored minor units.
    #[must_use]
    pub fn from_minor_units(units: i64) -> Self {
        Self(Decimal::new(units, MINOR_UNIT_SCALE))
    }

    /// Converts to minor units for storage.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::TooPrecise` when the amount carries sub-minor-unit
    /// digits, `MoneyError::OutOfRange` when it does not fit an `i64`.
    pub fn to_minor_units(self) -> Result<i64, MoneyError> {
        let scaled = self
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(MoneyError::OutOfRange(self.0))?;
        if !scaled.fract().is_zero() {
            return Err(MoneyError::TooPrecise(self.0));
        }
        scaled.to_i64().ok_or(MoneyError::OutOfRange(self.0))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::ops::Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {CURRENCY_CODE}", self.0.normalize())
    }
}
