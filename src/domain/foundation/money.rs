//! Money value object.
//!
//! All monetary values are stored as i64 minor units (paise/cents), never
//! floats. Arithmetic is checked so that a corrupt amount fails loudly
//! instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// An amount of money in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units, rejecting negative values.
    pub fn from_minor(minor: i64) -> Result<Self, ValidationError> {
        if minor < 0 {
            return Err(ValidationError::out_of_range(
                "amount",
                0,
                i64::MAX,
                minor,
            ));
        }
        Ok(Self(minor))
    }

    /// Creates an amount from whole currency units (e.g. rupees).
    pub fn from_major(major: i64) -> Result<Self, ValidationError> {
        Self::from_minor(major.checked_mul(100).ok_or_else(|| {
            ValidationError::invalid_format("amount", "overflow converting to minor units")
        })?)
    }

    /// Returns the amount in minor units.
    pub fn as_minor(&self) -> i64 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_minor_accepts_positive_amounts() {
        let m = Money::from_minor(249_900).unwrap();
        assert_eq!(m.as_minor(), 249_900);
    }

    #[test]
    fn from_minor_rejects_negative_amounts() {
        assert!(Money::from_minor(-1).is_err());
    }

    #[test]
    fn from_major_scales_by_hundred() {
        let m = Money::from_major(2499).unwrap();
        assert_eq!(m.as_minor(), 249_900);
    }

    #[test]
    fn checked_add_sums_amounts() {
        let a = Money::from_major(1299).unwrap();
        let b = Money::from_major(1200).unwrap();
        assert_eq!(a.checked_add(b).unwrap(), Money::from_major(2499).unwrap());
    }

    #[test]
    fn checked_add_detects_overflow() {
        let a = Money::from_minor(i64::MAX).unwrap();
        let b = Money::from_minor(1).unwrap();
        assert!(a.checked_add(b).is_none());
    }

    #[test]
    fn displays_major_and_minor_parts() {
        let m = Money::from_minor(129_950).unwrap();
        assert_eq!(m.to_string(), "1299.50");
    }
}
