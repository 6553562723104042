//! # Money Module
//!
//! Provides the `Money` type for handling colón amounts safely.
//!
//! ## Why Integer Céntimos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point (f64):                                        │
//! │    format!("{:.2}", 1.005) = "1.00"   ❌ (1.005 is 1.00499999...)       │
//! │    0.1 + 0.2        = 0.30000000000000004                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Céntimos + Decimal Quantities                    │
//! │    ₡1.005 is never stored: amounts are i64 céntimos                     │
//! │    quantities (m², units) are exact base-10 `Decimal`s                  │
//! │    every product is rounded half-up to the céntimo exactly once         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use granimar_core::money::Money;
//!
//! // Create from céntimos (preferred)
//! let price = Money::from_centimos(150_000); // ₡1500.00
//!
//! // Arithmetic saturates at the i64 bounds instead of overflowing
//! let total = price + Money::from_centimos(50);     // ₡1500.50
//! assert_eq!(total.centimos(), 150_050);
//! assert_eq!((Money::from_centimos(i64::MAX) + price).centimos(), i64::MAX);
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents an amount of Costa Rican colones in céntimos (1/100 colón).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credits and discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Two decimal digits by construction**: nothing finer than a céntimo
///   can be represented, so no exposed result carries more precision
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Factura.precio_por_metro ──► × metros_cuadrados ──► subtotal           │
/// │                                                         │               │
/// │                                         IVA 13% ◄───────┤               │
/// │                                            │            │               │
/// │                                            └──► total ◄─┘               │
/// │                                                                         │
/// │  Displayed as "₡16 950,00" by the format module                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from céntimos.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::money::Money;
    ///
    /// let price = Money::from_centimos(1099); // ₡10.99
    /// assert_eq!(price.centimos(), 1099);
    /// ```
    #[inline]
    pub const fn from_centimos(centimos: i64) -> Self {
        Money(centimos)
    }

    /// Creates a Money value from colones and céntimos.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::money::Money;
    ///
    /// let price = Money::from_colones(1500, 25); // ₡1500.25
    /// assert_eq!(price.centimos(), 150_025);
    ///
    /// let credit = Money::from_colones(-5, 50); // -₡5.50
    /// assert_eq!(credit.centimos(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the colones part should be negative.
    /// `from_colones(-5, 50)` = -₡5.50, not -₡4.50
    #[inline]
    pub const fn from_colones(colones: i64, centimos: i64) -> Self {
        let whole = colones.saturating_mul(100);
        if colones < 0 {
            Money(whole.saturating_sub(centimos))
        } else {
            Money(whole.saturating_add(centimos))
        }
    }

    /// Converts a decimal colón amount, rounding half-up to the céntimo.
    ///
    /// Returns `None` when the amount does not fit in `i64` céntimos.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Decimal::new(10005, 3); // 10.005
    /// assert_eq!(Money::checked_from_decimal(amount).unwrap().centimos(), 1001);
    /// ```
    pub fn checked_from_decimal(amount: Decimal) -> Option<Self> {
        amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
    }

    /// Same as [`Money::checked_from_decimal`], saturating at the `i64` bounds.
    pub fn from_decimal(amount: Decimal) -> Self {
        Self::checked_from_decimal(amount).unwrap_or_else(|| {
            if amount.is_sign_negative() {
                Money(i64::MIN)
            } else {
                Money(i64::MAX)
            }
        })
    }

    /// Converts a JSON number (`f64`), rounding half-up to the céntimo.
    ///
    /// Returns `None` for `NaN`, infinities and values outside the decimal
    /// range.
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        Decimal::from_f64(amount).and_then(Self::checked_from_decimal)
    }

    /// Returns the amount as an exact two-decimal colón value.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in céntimos.
    #[inline]
    pub const fn centimos(&self) -> i64 {
        self.0
    }

    /// Returns the whole colones portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::money::Money;
    ///
    /// assert_eq!(Money::from_centimos(1099).colones(), 10);
    /// assert_eq!(Money::from_centimos(-550).colones(), -5);
    /// ```
    #[inline]
    pub const fn colones(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the céntimos portion (always 0-99).
    #[inline]
    pub const fn centimos_part(&self) -> i64 {
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Adds two amounts, clamping at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts, clamping at the `i64` bounds.
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// Calculates tax with half-up rounding (half away from zero).
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF-UP ROUNDING TO THE CÉNTIMO                                     │
    /// │                                                                     │
    /// │    ₡0.50 × 13% = 6.5 céntimos  → 7 céntimos                         │
    /// │    ₡0.01 × 13% = 0.13 céntimos → 0 céntimos                         │
    /// │   -₡0.50 × 13% = -6.5 céntimos → -7 céntimos (symmetric)            │
    /// │                                                                     │
    /// │  Every stored or displayed amount carries exactly two decimals.     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::money::Money;
    /// use granimar_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_colones(15_000, 0);
    /// let tax = subtotal.calculate_tax(TaxRate::IVA);
    /// assert_eq!(tax, Money::from_colones(1_950, 0));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128: céntimos × bps cannot overflow
        let tax = div_round_half_up(self.0 as i128 * rate.bps() as i128, 10_000);
        Money(saturate(tax))
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// The product is rounded half-up to the céntimo; results beyond the
    /// `i64` range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let per_metre = Money::from_colones(45_000, 0);
    /// let area = Decimal::new(125, 1); // 12.5 m²
    /// assert_eq!(per_metre.multiply_quantity(area), Money::from_colones(562_500, 0));
    /// ```
    pub fn multiply_quantity(&self, quantity: Decimal) -> Money {
        let product = Decimal::from(self.0)
            .checked_mul(quantity)
            .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|p| p.to_i64());

        match product {
            Some(centimos) => Money(centimos),
            None if self.is_negative() != quantity.is_sign_negative() => Money(i64::MIN),
            None => Money(i64::MAX),
        }
    }
}

/// Integer division rounding half away from zero.
fn div_round_half_up(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        quotient + numerator.signum() * denominator.signum()
    } else {
        quotient
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a plain, locale-free format.
///
/// ## Note
/// This is for logs and debugging. Use `FormatConfig::format_money` for
/// anything a customer sees.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₡{}.{:02}",
            sign,
            self.colones().unsigned_abs(),
            self.centimos_part()
        )
    }
}

// Operators saturate like `saturating_add`; none of them panics.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl Neg for Money {
    type Output = Self;

    /// `-Money(i64::MIN)` is `Money(i64::MAX)`.
    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
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
