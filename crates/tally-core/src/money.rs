//! # Money Module
//!
//! Provides the `Money` type used for bundle prices and basket totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    1.25 + 1.25 + 1.25 + 0.75 = 4.999999999  ❌ WRONG!                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    125 + 125 + 125 + 75 = 450 cents = $4.50                            │
//! │    Bundle math (quotient × bundle price) stays exact                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let unit = Money::from_cents(125);      // $1.25
//! let three_for = Money::from_cents(300); // $3.00
//!
//! let total = three_for + unit.checked_mul_quantity(2).unwrap();
//! assert_eq!(total.cents(), 550);
//! ```
//!
//! ## Overflow
//! Bundle math is checked ([`Money::checked_mul_quantity`]) and sums
//! saturate at [`Money::MAX`] / [`Money::MIN`] instead of wrapping, so a
//! huge basket can never turn into a negative total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a misconfigured price list may carry zero or negative
///   prices, and validation has to be able to see them
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as cents**: `{"bundle_price": 300}` means $3.00
///
/// ## Where Money Flows
/// ```text
/// PricingRule.bundle_price ──► quotient × price ──► LineTotal.total
///                                                        │
///                                                        ▼
///                                        Terminal::calculate_total()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount; saturating sums stop here.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(425); // $4.25
    /// assert_eq!(price.cents(), 425);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
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
    ///
    /// Pricing rules must satisfy this; see [`crate::pricing::RuleTable`].
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a bundle count, or `None` if the result does not fit.
    ///
    /// ## User Workflow
    /// ```text
    /// Rule: 3 for $3.00
    /// Scanned: 7 units
    ///      │
    ///      ▼
    /// 7 / 3 = 2 bundles → checked_mul_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// $6.00, remainder 1 unit falls through to the unit price
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: u64) -> Option<Self> {
        let qty = i64::try_from(qty).ok()?;
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, clamping at [`Money::MAX`] / [`Money::MIN`].
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering. Hosts own currency formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating addition.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

/// Saturating sum, used for basket totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
