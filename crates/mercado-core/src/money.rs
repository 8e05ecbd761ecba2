//! # Money Module
//!
//! Fixed-point monetary values with 4 decimal places of precision.
//!
//! ## Representation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Money(i64) = value × 10_000                                        │
//! │                                                                     │
//! │  10.0000  →  Money(100_000)                                         │
//! │   0.0001  →  Money(1)                                               │
//! │  -5.5000  →  Money(-55_000)                                         │
//! │                                                                     │
//! │  Sale totals and unit-price snapshots are stored with 4 decimal    │
//! │  places, so the scale is 10_000 rather than the usual cents.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Floats never enter the picture: the database, the calculations and the
//! API all use the scaled integer. Only display formatting converts to a
//! decimal string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Number of scaled units per whole currency unit (4 decimal places).
pub const MONEY_SCALE: i64 = 10_000;

/// A monetary value in ten-thousandths of a currency unit.
///
/// - **i64 (signed)**: negative values stay representable (refunds,
///   corrections), even though the domain invariants keep prices and
///   totals non-negative.
/// - **Newtype over i64**: zero-cost, serializes as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the scaled representation.
    ///
    /// ## Example
    /// ```rust
    /// use mercado_core::money::Money;
    ///
    /// let price = Money::from_scaled(100_000); // 10.0000
    /// assert_eq!(price.scaled(), 100_000);
    /// ```
    #[inline]
    pub const fn from_scaled(scaled: i64) -> Self {
        Money(scaled)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use mercado_core::money::Money;
    ///
    /// let price = Money::from_units(10); // 10.0000
    /// assert_eq!(price.scaled(), 100_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * MONEY_SCALE)
    }

    /// Returns the scaled representation (value × 10_000).
    #[inline]
    pub const fn scaled(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / MONEY_SCALE
    }

    /// Returns the fractional portion in ten-thousandths (always 0-9999).
    ///
    /// ## Example
    /// ```rust
    /// use mercado_core::money::Money;
    ///
    /// assert_eq!(Money::from_scaled(103_500).frac(), 3_500); // 10.3500
    /// assert_eq!(Money::from_scaled(-55_000).frac(), 5_000); // -5.5000
    /// ```
    #[inline]
    pub const fn frac(&self) -> i64 {
        (self.0 % MONEY_SCALE).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// Returns `None` when the product exceeds the representable range,
    /// so an absurd price times a large quantity surfaces as invalid
    /// input instead of panicking.
    ///
    /// ## Example
    /// ```rust
    /// use mercado_core::money::Money;
    ///
    /// let unit_price = Money::from_units(10);
    /// assert_eq!(unit_price.multiply_quantity(3), Some(Money::from_units(30)));
    /// assert_eq!(Money::from_scaled(i64::MAX).multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(scaled) => Some(Money(scaled)),
            None => None,
        }
    }

    /// Adds two values, returning `None` on overflow. Used when
    /// accumulating a sale total out of line totals.
    #[inline]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(scaled) => Some(Money(scaled)),
            None => None,
        }
    }
}

/// Display shows the decimal form with all 4 places, for debugging and
/// log output. Wire formatting belongs to the transport layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:04}", sign, self.units().abs(), self.frac())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation, so a sale total is `lines.map(|l| ...).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scaled() {
        let money = Money::from_scaled(103_500);
        assert_eq!(money.scaled(), 103_500);
        assert_eq!(money.units(), 10);
        assert_eq!(money.frac(), 3_500);
    }

    #[test]
    fn test_from_units() {
        assert_eq!(Money::from_units(10).scaled(), 100_000);
        assert_eq!(Money::from_units(-5).scaled(), -50_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_scaled(100_000)), "10.0000");
        assert_eq!(format!("{}", Money::from_scaled(103_500)), "10.3500");
        assert_eq!(format!("{}", Money::from_scaled(-55_000)), "-5.5000");
        assert_eq!(format!("{}", Money::from_scaled(1)), "0.0001");
        assert_eq!(format!("{}", Money::zero()), "0.0000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::from_units(5);

        assert_eq!((a + b).units(), 15);
        assert_eq!((a - b).units(), 5);
        assert_eq!((a * 3).units(), 30);
    }

    #[test]
    fn test_multiply_quantity() {
        // Widget scenario: 10.00 × 3 = 30.00
        let unit_price = Money::from_units(10);
        assert_eq!(unit_price.multiply_quantity(3), Some(Money::from_units(30)));
    }

    #[test]
    fn test_multiply_quantity_overflow_is_none() {
        assert_eq!(Money::from_scaled(i64::MAX).multiply_quantity(2), None);
        assert_eq!(Money::from_scaled(i64::MAX / 2).multiply_quantity(3), None);
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_units(10);
        assert_eq!(a.checked_add(Money::from_units(5)), Some(Money::from_units(15)));
        assert_eq!(Money::from_scaled(i64::MAX).checked_add(Money::from_scaled(1)), None);
    }

    #[test]
    fn test_sum_over_lines() {
        // Σ(unit_price × quantity) over a two-line sale
        let lines = [(Money::from_units(10), 3), (Money::from_scaled(25_000), 2)];
        let total: Money = lines
            .iter()
            .map(|(price, qty)| price.multiply_quantity(*qty).unwrap())
            .sum();

        // 30.0000 + 5.0000
        assert_eq!(total, Money::from_units(35));
    }

    #[test]
    fn test_zero_and_negative_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_scaled(-1).is_negative());
        assert!(!Money::from_scaled(1).is_negative());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_units(10)).unwrap();
        assert_eq!(json, "100000");

        let back: Money = serde_json::from_str("100000").unwrap();
        assert_eq!(back, Money::from_units(10));
    }
}
