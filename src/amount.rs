//! Non-negative monetary amount.
//!
//! Wraps `rust_decimal::Decimal` and refuses negative values at construction,
//! so neither a balance nor a transfer amount can ever be negative.

use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A decimal amount that is always `>= 0`.
///
/// Arithmetic is checked: [`Amount::checked_add`] reports overflow and
/// [`Amount::checked_sub`] reports a result that would go below zero. Both
/// also refuse any result `Decimal` would have to round.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use funds_ledger::Amount;
///
/// let amount = Amount::from_str("10.50").unwrap();
/// assert_eq!(amount.to_string(), "10.5");
/// assert!(Amount::from_str("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates an amount, failing with [`LedgerError::NegativeAmount`] for values below zero.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(value.to_string()));
        }
        Ok(Amount(value))
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, returning `None` unless the sum is represented exactly.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self.0.checked_add(rhs.0)?;
        exact(sum, self.0, rhs.0).map(Amount)
    }

    /// Subtracts `rhs`, returning `None` if the result would be negative or
    /// cannot be represented exactly.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let diff = self.0.checked_sub(rhs.0)?;
        if diff < Decimal::ZERO {
            return None;
        }
        exact(diff, self.0, rhs.0).map(Amount)
    }
}

// `Decimal` keeps at most 28 significant digits and rounds the rest away
// without reporting it. When it has to drop scale, the result is exact only if
// neither operand carried digits below the scale it kept.
fn exact(result: Decimal, lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let scale = result.scale();
    if lhs.round_dp(scale) == lhs && rhs.round_dp(scale) == rhs {
        Some(result)
    } else {
        None
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Amount::new(value)
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Amount::new(parse_exact(s)?)
    }
}

/// Parses a decimal, rejecting input that would lose digits.
///
/// `Decimal::from_str` silently rounds past 28 decimal places; an amount must
/// never differ from what was written.
pub fn parse_exact(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    Decimal::from_str_exact(trimmed)
        .map_err(|_| LedgerError::InvalidAmount(trimmed.to_string()))
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
