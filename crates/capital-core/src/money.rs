//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    2397 × 1.18 = 2828.4599999999996  ❌ WRONG!                          │
//! │                                                                         │
//! │  With integer paise, GST on discounted amounts still needs rounding:   │
//! │    434.45 × 0.18 = 78.201 → 78.20   → lost 0.001                        │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimal                                            │
//! │    Every intermediate value is kept exactly (512.658, 3360.758).        │
//! │    Rounding to paise happens ONLY when an amount is displayed.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use capital_core::money::Money;
//!
//! let rate = Money::from_major(1499);
//! let line = rate * 2;                       // ₹2998.00
//! let gst = line.percent(18.into());         // ₹539.64
//! assert_eq!((line + gst).to_string(), "₹3537.64");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Decimal places of the minor unit (paise).
const MINOR_UNIT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount with exact decimal precision.
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Batch.sale_price ──┬──► BillItem.rate ──► BillItem.amount              │
/// │                     │                                                   │
/// │                     └──► Displayed as "₹1499.00" on the counter         │
/// │                                                                         │
/// │  subtotal ──► discount ──► GST (CGST + SGST) ──► grand_total            │
/// │                                                                         │
/// │  Batch.purchase_price ──► profit reports                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Serialized as a JSON number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Wraps an exact decimal amount in rupees.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use capital_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(1499).to_string(), "₹1499.00");
    /// ```
    #[inline]
    pub fn from_major(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use capital_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(51266).to_string(), "₹512.66");
    /// ```
    #[inline]
    pub fn from_minor(paise: i64) -> Self {
        Money(Decimal::new(paise, MINOR_UNIT_SCALE))
    }

    /// Returns the exact amount in rupees.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Batch BTH-004: Pakistani Suit ₹1499
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line amount: ₹2998
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Returns `pct` percent of this amount, unrounded.
    ///
    /// ```rust
    /// use capital_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_major(2998);
    /// let off = subtotal.percent(Decimal::from(5));
    /// assert_eq!(off.amount(), Decimal::new(1499, 1)); // 149.9
    /// ```
    pub fn percent(&self, pct: Decimal) -> Money {
        Money(self.0 * pct / Decimal::ONE_HUNDRED)
    }

    /// Multiplies by an arbitrary decimal factor (e.g. a tax rate).
    #[inline]
    pub fn scale(&self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }

    /// Splits the amount into two equal halves (CGST / SGST).
    #[inline]
    pub fn half(&self) -> Money {
        Money(self.0 / Decimal::TWO)
    }

    /// Rounds to paise, half away from zero.
    ///
    /// Only used for display and receipts; stored totals stay exact.
    pub fn round_to_paise(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounds to whole rupees, half away from zero.
    pub fn round_to_major(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to paise, e.g. `₹512.66` or `-₹0.24`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_paise().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}₹{:.2}", sign, rounded.abs())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        self.scale(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_major(1499).amount(), dec!(1499));
        assert_eq!(Money::from_minor(1099).amount(), dec!(10.99));
        assert_eq!(Money::from_minor(-550).amount(), dec!(-5.50));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_major(1499).to_string(), "₹1499.00");
        assert_eq!(Money::new(dec!(512.658)).to_string(), "₹512.66");
        assert_eq!(Money::new(dec!(3360.758)).to_string(), "₹3360.76");
        assert_eq!(Money::new(dec!(-0.24)).to_string(), "-₹0.24");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Money::new(dec!(0.125)).to_string(), "₹0.13");
        assert_eq!(Money::new(dec!(-0.125)).to_string(), "-₹0.13");
        // Tiny negatives round to zero without a sign
        assert_eq!(Money::new(dec!(-0.001)).to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(1000);
        let b = Money::from_major(500);

        assert_eq!((a + b).amount(), dec!(1500));
        assert_eq!((a - b).amount(), dec!(500));
        assert_eq!((a * 3).amount(), dec!(3000));
        assert_eq!((a * dec!(0.18)).amount(), dec!(180));

        let mut c = a;
        c += b;
        c -= Money::from_major(100);
        assert_eq!(c.amount(), dec!(1400));
    }

    #[test]
    fn test_percent_is_exact() {
        let subtotal = Money::new(dec!(2848.1));
        // 2848.1 × 18% = 512.658, kept exactly
        assert_eq!(subtotal.percent(dec!(18)).amount(), dec!(512.658));
    }

    #[test]
    fn test_half_split() {
        let tax = Money::new(dec!(512.658));
        assert_eq!(tax.half().amount(), dec!(256.329));
        assert_eq!(tax.half() + tax.half(), tax);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Money::new(dec!(2828.46)).round_to_major().amount(), dec!(2828));
        assert_eq!(Money::new(dec!(2828.5)).round_to_major().amount(), dec!(2829));
        assert_eq!(Money::new(dec!(3360.755)).round_to_paise().amount(), dec!(3360.76));
    }

    #[test]
    fn test_sum() {
        let items = vec![Money::from_major(1499), Money::from_major(899)];
        let total: Money = items.iter().sum();
        assert_eq!(total.amount(), dec!(2398));
        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_minor(-1).is_negative());
        assert!(!Money::from_minor(1).is_negative());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_major(1499)).unwrap();
        assert_eq!(json, "1499");
        let back: Money = serde_json::from_str("2828.46").unwrap();
        assert_eq!(back.amount(), dec!(2828.46));
    }

    #[test]
    fn test_json_keeps_every_digit() {
        let exact = Money::new(dec!(970227064.504266966));
        let json = serde_json::to_string(&exact).unwrap();
        assert_eq!(json, "970227064.504266966");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exact);
    }
}
