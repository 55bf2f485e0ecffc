//! # Money Module
//!
//! Integer money for cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON numbers:                          │
//! │    179.9 × 3 = 539.7000000000001  ❌                                    │
//! │                                                                         │
//! │  OUR SOLUTION: round each unit price to cents ONCE at the boundary,    │
//! │  then do every sum and product on i64 cents.                           │
//! │    17990 × 3 = 53970 cents  ✅                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocket_core::money::Money;
//!
//! let price = Money::from_decimal_price(179.9);
//! assert_eq!(price.cents(), 17990);
//! assert_eq!((price * 3).format("R$", ','), "R$ 539,70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal price from the catalog API to cents.
    ///
    /// Rounds half away from zero, so `0.005` becomes one cent. Only meant
    /// for API boundaries; never do arithmetic on the float.
    pub fn from_decimal_price(price: f64) -> Self {
        Money((price * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Formats for display with a currency symbol and decimal separator.
    ///
    /// ```rust
    /// use rocket_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(17990).format("R$", ','), "R$ 179,90");
    /// assert_eq!(Money::from_cents(-550).format("$", '.'), "-$ 5.50");
    /// ```
    pub fn format(&self, symbol: &str, decimal_separator: char) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{} {}{}{:02}",
            sign,
            symbol,
            self.major().abs(),
            decimal_separator,
            self.minor()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. UI code goes through [`Money::format`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Multiplication by a quantity.
///
/// Addition and multiplication saturate at the `i64` bounds. A snapshot may
/// carry any amount >= 1, so totals must not panic or wrap.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
