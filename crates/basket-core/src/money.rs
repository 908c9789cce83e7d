//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    5.005 is stored as 5.00499999...  → rounds to 5.00  ❌ WRONG!        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer ten-thousandths                                  │
//! │    5.005  → 50050 (exact)                                               │
//! │    × 3    → 150150 (exact)                                              │
//! │    round to cents → 15.02 (half away from zero)                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unit prices keep four decimal places so that a line total is exactly
//! `unit_price × quantity`. Only the grand total is rounded to cents.
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//!
//! let price = Money::from_cents(999); // $9.99
//! let line = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line.to_string(), "$19.98");
//!
//! let odd = Money::from_decimal(5.005).unwrap();
//! assert_eq!(odd.round_to_cents().cents(), 501);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::CURRENCY_SYMBOL;

/// Number of raw units in one whole currency unit.
pub const RAW_PER_UNIT: i64 = 10_000;

/// Number of raw units in one cent.
pub const RAW_PER_CENT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value stored in ten-thousandths of the currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between totals can be negative
/// - **Four decimal places**: sub-cent unit prices (e.g. `5.005`) stay exact
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  add(name, 9.99) ──► CartEntry.unit_price ──► CartEntry.line_total     │
/// │                                                       │                 │
/// │                                                       ▼                 │
/// │                         Σ line_total ──► round_to_cents ──► grand_total │
/// │                                                                         │
/// │                                          Displayed as "$19.98"          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from raw ten-thousandths.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Money(raw)
    }

    /// Creates a Money value from whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.raw(), 109_900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * RAW_PER_CENT)
    }

    /// Converts a decimal amount (as typed by a user or sent by a renderer)
    /// into Money, rounding to the nearest ten-thousandth.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(9.99), Some(Money::from_cents(999)));
    /// assert_eq!(Money::from_decimal(5.005).map(|m| m.raw()), Some(50_050));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let scaled = (value * RAW_PER_UNIT as f64).round();
        if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
            return None;
        }

        Some(Money(scaled as i64))
    }

    /// Returns the raw value in ten-thousandths.
    #[inline]
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Returns the value in whole cents, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_raw(50_050).cents(), 501);
    /// assert_eq!(Money::from_raw(50_049).cents(), 500);
    /// assert_eq!(Money::from_raw(-50_050).cents(), -501);
    /// ```
    pub const fn cents(&self) -> i64 {
        let half = RAW_PER_CENT / 2;
        if self.0 >= 0 {
            (self.0 + half) / RAW_PER_CENT
        } else {
            -((-self.0 + half) / RAW_PER_CENT)
        }
    }

    /// Rounds the value to whole cents (half away from zero).
    ///
    /// This is the "currency-safe" rounding applied to grand totals.
    #[inline]
    pub const fn round_to_cents(&self) -> Self {
        Money::from_cents(self.cents())
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(999); // $9.99
    /// let line_total = unit_price.checked_multiply_quantity(3);
    /// assert_eq!(line_total.map(|m| m.cents()), Some(2997)); // $29.97
    /// assert_eq!(Money::from_raw(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(raw) => Some(Money(raw)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(raw) => Some(Money(raw)),
            None => None,
        }
    }

    /// Sums amounts without panicking, or `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Self> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Always two decimal places with the fixed currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            cents / 100,
            cents % 100
        )
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
