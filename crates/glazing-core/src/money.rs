//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1.1136 m² × 50 = 55.679999999999996  ❌ WRONG!                       │
//! │                                                                         │
//! │  Integer cents do not help either: the billable area carries four       │
//! │  decimals and margin inversion produces repeating fractions:            │
//! │    100 / (1 - 0.05) = 105.263157894736842...                            │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals, rounded ONCE at display          │
//! │    1.1136 × 50 = 55.6800 (exact)                                        │
//! │    105.2631578947368421052631579 → "105.26" only when shown             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use glazing_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price_per_m2 = Money::parse("50").unwrap();
//! let cost = price_per_m2.times(Decimal::new(11136, 4)); // 1.1136 m²
//! assert_eq!(cost.to_fixed(2), "55.68");
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::CURRENCY_DECIMALS;

// =============================================================================
// Money Type
// =============================================================================

/// An exact decimal monetary amount.
///
/// ## Design Decisions
/// - **Decimal (signed)**: 28 significant digits, no binary rounding error
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Immutable**: every operation returns a new `Money`
/// - **Serialized as a string**: `"105.26315789..."`, never a JSON float
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  GlassType.price_per_m2 ──► glass cost ──┐                              │
/// │                                          ├──► model cost ──► margin     │
/// │  Model.base_price ──────► profile cost ──┘                   │          │
/// │                                                              ▼          │
/// │  Service.rate ──────────► service charges ──────────► unit price        │
/// │                                                              │          │
/// │                                          line subtotal ◄─────┘          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole-unit amount.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(100).to_fixed(2), "100.00");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Parses a numeric string such as `"185000"`, `"12.50"` or `"1.5e3"`.
    ///
    /// Surrounding whitespace is ignored. Anything else that is not a
    /// decimal number fails with [`CoreError::InvalidMoneyValue`].
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::money::Money;
    ///
    /// assert!(Money::parse(" 12.50 ").is_ok());
    /// assert!(Money::parse("12,50").is_err());
    /// ```
    pub fn parse(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidMoneyValue(input.to_string()));
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Money)
            .map_err(|_| CoreError::InvalidMoneyValue(input.to_string()))
    }

    /// Converts a float handed over by a form or JSON number.
    ///
    /// NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidMoneyValue(value.to_string()));
        }

        Decimal::from_f64(value)
            .map(Money)
            .ok_or_else(|| CoreError::InvalidMoneyValue(value.to_string()))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Money {
        Money(self.0.abs())
    }

    /// Multiplies by a scalar (area, quantity, coefficient) at full precision.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let per_m2 = Money::from_major(185000);
    /// let cost = per_m2.times(Decimal::new(9604, 4)); // 0.9604 m²
    /// assert_eq!(cost, Money::from_major(177674));
    /// ```
    #[inline]
    pub fn times(&self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }

    /// Returns `percent`% of this amount: `self × percent / 100`.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let surcharge = Money::from_major(200).percentage(Decimal::from(15));
    /// assert_eq!(surcharge, Money::from_major(30));
    /// ```
    #[inline]
    pub fn percentage(&self, percent: Decimal) -> Money {
        Money(self.0 * percent / Decimal::ONE_HUNDRED)
    }

    /// Returns `self × (1 + percent / 100)`.
    #[inline]
    pub fn increase_by_percentage(&self, percent: Decimal) -> Money {
        Money(self.0 * (Decimal::ONE + percent / Decimal::ONE_HUNDRED))
    }

    /// Divides by a decimal divisor.
    ///
    /// ## Errors
    /// - [`CoreError::DivisionByZero`] when `divisor` is zero
    /// - [`CoreError::Overflow`] when the quotient leaves the decimal range
    pub fn divide(&self, divisor: Decimal) -> CoreResult<Money> {
        if divisor.is_zero() {
            return Err(CoreError::DivisionByZero {
                context: format!("{} / {}", self.0, divisor),
            });
        }
        self.0
            .checked_div(divisor)
            .map(Money)
            .ok_or_else(|| CoreError::Overflow {
                context: format!("{} / {}", self.0, divisor),
            })
    }

    // =========================================================================
    // Checked Arithmetic
    // =========================================================================
    //
    // The operators above panic past ±7.9 × 10²⁸ the way `Decimal` does.
    // The pricing pipeline runs on catalog data it does not control, so it
    // only uses the checked forms below.

    /// `self + other`, or [`CoreError::Overflow`].
    pub fn checked_add(&self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| CoreError::Overflow {
                context: format!("{} + {}", self.0, other.0),
            })
    }

    /// Checked [`times`](Self::times).
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Money::new(Decimal::MAX).checked_times(Decimal::TWO).is_err());
    /// ```
    pub fn checked_times(&self, factor: Decimal) -> CoreResult<Money> {
        self.0
            .checked_mul(factor)
            .map(Money)
            .ok_or_else(|| CoreError::Overflow {
                context: format!("{} × {}", self.0, factor),
            })
    }

    /// Checked [`increase_by_percentage`](Self::increase_by_percentage).
    pub fn checked_increase_by_percentage(&self, percent: Decimal) -> CoreResult<Money> {
        let factor = Decimal::ONE
            .checked_add(percent / Decimal::ONE_HUNDRED)
            .ok_or_else(|| CoreError::Overflow {
                context: format!("1 + {}%", percent),
            })?;
        self.checked_times(factor)
    }

    /// Sums amounts, stopping at the first overflow.
    pub fn checked_sum<I>(amounts: I) -> CoreResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }

    /// Rounds to `dp` decimal places, halves away from zero.
    ///
    /// Half-away-from-zero is the browser decimal library default
    /// (`ROUND_HALF_UP`); both sides must round the same way.
    #[inline]
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounds to currency precision (2 decimal places).
    #[inline]
    pub fn round_currency(&self) -> Money {
        self.round_dp(CURRENCY_DECIMALS)
    }

    /// Converts to `f64` for charting and other display-only uses.
    ///
    /// Never feed the result back into a calculation.
    pub fn to_number(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Formats with exactly `dp` decimal places, like JavaScript `toFixed`.
    ///
    /// ## Example
    /// ```rust
    /// use glazing_core::money::Money;
    ///
    /// let price = Money::parse("105.263157894736842").unwrap();
    /// assert_eq!(price.to_fixed(2), "105.26");
    /// assert_eq!(Money::from_major(60).to_fixed(2), "60.00");
    /// ```
    pub fn to_fixed(&self, dp: u32) -> String {
        let mut rounded = self.round_dp(dp).0;
        rounded.rescale(dp);
        rounded.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the 2-decimal currency form without a symbol.
///
/// ## Note
/// Currency symbols are a tenant setting; see `glazing-quote`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed(CURRENCY_DECIMALS))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl TryFrom<f64> for Money {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::from_f64(value)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Money::from_major(units)
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

/// Multiplication by a decimal scalar.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        self.times(factor)
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
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
