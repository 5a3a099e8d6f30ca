//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Price ₹333 at 25% off in floating point:                               │
//! │    333 × 0.25 = 83.25, then 333 − 83.25 = 249.75                       │
//! │    Summed over a cart, fractions drift and MRP ≠ discount + final       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 ₹ = 100 paise)                          │
//! │    33300 paise × 2500 bps / 10000 = 8325 paise                          │
//! │    final = 33300 − 8325 = 24975 paise, reconciles exactly               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use niramaya_core::money::Money;
//!
//! let price = Money::from_rupees(300);
//! let doubled = price * 2;
//! assert_eq!(doubled, Money::from_rupees(600));
//! assert_eq!(doubled.to_string(), "₹600");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest rupee unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps; the engine clamps where a
///   negative value would be meaningless (fee lookup)
/// - **Single field tuple struct**: serializes as a bare integer
///
/// ## Where Money is Used
/// ```text
/// CatalogLineItem.unit_price ──► PricedLineItem.{mrp, discount, final}
///                                           │
///                                           ▼
///         PricingResult.{order_total, total_discount, final_payable}
///                                           │
///                                           ▼
///                         Displayed as "₹1,050" in the cart sidebar
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use niramaya_core::money::Money;
    ///
    /// let price = Money::from_paise(24050); // ₹240.50
    /// assert_eq!(price.paise(), 24050);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// The catalog lists every MRP in whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use niramaya_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(600).paise(), 60000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the rupee part carries the sign:
    /// `from_rupees_paise(-5, 50)` is -₹5.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the value, or zero if it is negative.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Applies a rate and returns the resulting portion of this amount.
    ///
    /// ## Rounding
    /// Half-up to the nearest paisa: `floor((paise × bps + 5000) / 10000)`.
    /// The intermediate runs in i128 so large carts cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use niramaya_core::money::Money;
    /// use niramaya_core::types::DiscountRate;
    ///
    /// let mrp = Money::from_rupees(300);
    /// let discount = mrp.apply_rate(DiscountRate::from_percent(20));
    /// assert_eq!(discount, Money::from_rupees(60));
    ///
    /// // 0.05 paise rounds down, 0.5 paise rounds up
    /// assert_eq!(Money::from_paise(1).apply_rate(DiscountRate::from_bps(500)).paise(), 0);
    /// assert_eq!(Money::from_paise(1).apply_rate(DiscountRate::from_bps(5000)).paise(), 1);
    /// ```
    pub fn apply_rate(&self, rate: DiscountRate) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128 + 5000;
        Money(scaled.div_euclid(10000) as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use niramaya_core::money::Money;
    ///
    /// let per_unit = Money::from_rupees(525);
    /// assert_eq!(per_unit.multiply_quantity(2), Money::from_rupees(1050));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders rupees with Indian digit grouping (`₹1,23,456`).
///
/// Fractional digits follow en-IN locale output: none for whole rupees
/// (`₹240`), trailing zeros dropped otherwise (`₹240.5`, `₹1.05`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rupees = group_indian(self.0.unsigned_abs() / 100);
        let paise = self.paise_part();

        if paise == 0 {
            write!(f, "{}₹{}", sign, rupees)
        } else if paise % 10 == 0 {
            write!(f, "{}₹{}.{}", sign, rupees, paise / 10)
        } else {
            write!(f, "{}₹{}.{:02}", sign, rupees, paise)
        }
    }
}

/// Groups digits the en-IN way: last three, then pairs (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
