//! # Money Module
//!
//! Monetary values and percentage rates for the settlement engine.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A comanda split across three tenders must settle to the centavo.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    R$ 50,00 is 5000. Fees and commissions round explicitly,            │
//! │    in one place, with i128 intermediate math.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use navalha_core::money::{Money, Rate};
//!
//! // Create from centavos (the only way)
//! let price = Money::from_cents(5000); // R$ 50,00
//!
//! // Processor fee: 1.99% on a pix tender
//! let fee = price.apply_rate(Rate::from_bps(199));
//! assert_eq!(fee.cents(), 100); // rounds 99.5 -> 100
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: net drawer movements and reversals can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// Every value that moves money flows through this type: comanda totals,
/// tender amounts, processor fees, commission snapshots, drawer balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ```rust
    /// use navalha_core::money::Money;
    ///
    /// let price = Money::from_cents(3050); // R$ 30,50
    /// assert_eq!(price.cents(), 3050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-real portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Clamps negative values to zero.
    ///
    /// Used for remaining-balance math: `max(0, total - paid)`.
    #[inline]
    pub const fn clamp_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Applies a percentage rate and returns the resulting amount.
    ///
    /// This is the single rounding point for processor fees and commission
    /// snapshots: `amount × bps / 10_000`, half-up, computed in i128 so
    /// large drawer totals cannot overflow.
    ///
    /// ```rust
    /// use navalha_core::money::{Money, Rate};
    ///
    /// // R$ 10,00 at a 40% commission rate
    /// let price = Money::from_cents(1000);
    /// let commission = price.apply_rate(Rate::from_bps(4000));
    /// assert_eq!(commission.cents(), 400);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage expressed in basis points (1 bp = 0.01%).
///
/// Used for payment-method processor fees (199 = 1.99%) and professional
/// commission rates (4000 = 40%). Basis points keep the math integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience at config edges).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Creates a rate from a stored i64 column, clamping to `0..=10_000`.
    ///
    /// Rate columns carry no CHECK constraint; a hand-edited or corrupted
    /// row must not turn into an astronomical rate via wrapping casts.
    #[inline]
    pub const fn from_stored(bps: i64) -> Self {
        if bps < 0 {
            Rate(0)
        } else if bps > 10_000 {
            Rate(10_000)
        } else {
            Rate(bps as u32)
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in Brazilian format.
///
/// For debugging and receipts; UI localization is not a core concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R$ {},{:02}", sign, self.reais().abs(), self.cents_part())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (comanda totals, drawer totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(3050);
        assert_eq!(money.cents(), 3050);
        assert_eq!(money.reais(), 30);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "R$ 10,99");
        assert_eq!(format!("{}", Money::from_cents(500)), "R$ 5,00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$ 5,50");
        assert_eq!(format!("{}", Money::from_cents(0)), "R$ 0,00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [5000, 3000, 2000]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 10000);
    }

    #[test]
    fn test_clamp_zero() {
        assert_eq!(Money::from_cents(-300).clamp_zero().cents(), 0);
        assert_eq!(Money::from_cents(300).clamp_zero().cents(), 300);
    }

    #[test]
    fn test_apply_rate_commission() {
        // R$ 50,00 at 40% = R$ 20,00
        let price = Money::from_cents(5000);
        let rate = Rate::from_bps(4000);
        assert_eq!(price.apply_rate(rate).cents(), 2000);
    }

    #[test]
    fn test_apply_rate_fee_rounding() {
        // R$ 10,00 at 1.99% = R$ 0,199 -> rounds half-up to R$ 0,20
        let amount = Money::from_cents(1000);
        let fee = amount.apply_rate(Rate::from_bps(199));
        assert_eq!(fee.cents(), 20);
    }

    #[test]
    fn test_apply_rate_zero() {
        let amount = Money::from_cents(12345);
        assert!(amount.apply_rate(Rate::zero()).is_zero());
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(Rate::from_percentage(1.99).bps(), 199);
        assert_eq!(Rate::from_percentage(40.0).bps(), 4000);
    }

    #[test]
    fn test_rate_from_stored_clamps() {
        assert_eq!(Rate::from_stored(4000).bps(), 4000);
        assert_eq!(Rate::from_stored(0).bps(), 0);
        assert_eq!(Rate::from_stored(10_000).bps(), 10_000);

        // A stored -1 must not wrap into a 42-million-percent rate
        assert_eq!(Rate::from_stored(-1).bps(), 0);
        assert_eq!(Rate::from_stored(99_999).bps(), 10_000);
        assert!(Money::from_cents(5000).apply_rate(Rate::from_stored(-1)).is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    /// A frozen commission snapshot must not change when the rate used to
    /// produce it changes: the snapshot is a plain Money value.
    #[test]
    fn test_snapshot_is_value_not_formula() {
        let price = Money::from_cents(5000);
        let snapshot = price.apply_rate(Rate::from_bps(4000));

        // Later "rate change" produces a different value but the snapshot
        // taken above is untouched.
        let recalculated = price.apply_rate(Rate::from_bps(5000));
        assert_eq!(snapshot.cents(), 2000);
        assert_eq!(recalculated.cents(), 2500);
    }
}
