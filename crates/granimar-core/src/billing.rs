//! # Billing Module
//!
//! Subtotal, IVA and total calculations used by the invoice preview and by
//! the invoice records.
//!
//! ## Calculation Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  quantity × unit price ──► calculate_subtotal ──► round to céntimo      │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                            calculate_tax (13%) ──► round to céntimo     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                 calculate_total = subtotal + tax   (exact, no rounding) │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Negative quantities or prices are not rejected: they produce credits.
//! Form-level rules (area > 0, price > 0) live in [`crate::validation`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Core Calculations
// =============================================================================

/// `round2(quantity × unit_price)`.
///
/// ## Example
/// ```rust
/// use granimar_core::billing::calculate_subtotal;
/// use granimar_core::money::Money;
/// use rust_decimal::Decimal;
///
/// let subtotal = calculate_subtotal(Decimal::from(10), Money::from_colones(1500, 0));
/// assert_eq!(subtotal, Money::from_colones(15_000, 0));
/// ```
#[inline]
pub fn calculate_subtotal(quantity: Decimal, unit_price: Money) -> Money {
    unit_price.multiply_quantity(quantity)
}

/// `round2(subtotal × 0.13)`.
///
/// ## Example
/// ```rust
/// use granimar_core::billing::calculate_tax;
/// use granimar_core::money::Money;
///
/// assert_eq!(calculate_tax(Money::from_colones(15_000, 0)), Money::from_colones(1_950, 0));
/// ```
#[inline]
pub fn calculate_tax(subtotal: Money) -> Money {
    subtotal.calculate_tax(TaxRate::IVA)
}

/// `subtotal + tax`. Both operands are already whole céntimos, so the sum is
/// exact.
#[inline]
pub fn calculate_total(subtotal: Money, tax: Money) -> Money {
    subtotal.saturating_add(tax)
}

// =============================================================================
// Invoice Breakdown
// =============================================================================

/// Subtotal / IVA / total triple shown on the invoice preview.
///
/// ## Invariant
/// `total == subtotal + tax` and `tax == calculate_tax(subtotal)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceBreakdown {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl InvoiceBreakdown {
    /// Builds the breakdown from an already rounded subtotal.
    pub fn from_subtotal(subtotal: Money) -> Self {
        let tax = calculate_tax(subtotal);
        let breakdown = InvoiceBreakdown {
            subtotal,
            tax,
            total: calculate_total(subtotal, tax),
        };
        trace!(
            subtotal = %breakdown.subtotal,
            tax = %breakdown.tax,
            total = %breakdown.total,
            "Computed invoice breakdown"
        );
        breakdown
    }

    /// Area pricing: `square_metres × price_per_metre`, then IVA.
    ///
    /// ## User Workflow
    /// ```text
    /// Nueva factura form
    ///   metros_cuadrados: 12.5
    ///   precio_por_metro: ₡45 000
    ///      │
    ///      ▼
    /// for_area() ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Subtotal ₡562 500,00 · IVA ₡73 125,00 · Total ₡635 625,00
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::billing::InvoiceBreakdown;
    /// use granimar_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let quote = InvoiceBreakdown::for_area(Decimal::new(125, 1), Money::from_colones(45_000, 0));
    /// assert_eq!(quote.total, Money::from_colones(635_625, 0));
    /// ```
    pub fn for_area(square_metres: Decimal, price_per_metre: Money) -> Self {
        Self::from_subtotal(calculate_subtotal(square_metres, price_per_metre))
    }
}

// =============================================================================
// Multi-line Quote
// =============================================================================

/// One line of a quote: `quantity × unit_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteLine {
    #[ts(type = "number")]
    pub quantity: Decimal,
    pub unit_price: Money,
}

impl QuoteLine {
    pub fn new(quantity: Decimal, unit_price: Money) -> Self {
        QuoteLine {
            quantity,
            unit_price,
        }
    }

    /// Rounded line subtotal.
    #[inline]
    pub fn subtotal(&self) -> Money {
        calculate_subtotal(self.quantity, self.unit_price)
    }
}

/// A quote made of several product lines (`detalles_factura`).
///
/// Each line is rounded on its own; IVA is computed once on the sum so the
/// invoice shows a single tax line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
}

impl Quote {
    /// Creates an empty quote.
    pub fn new() -> Self {
        Quote::default()
    }

    /// Adds a line.
    pub fn push(&mut self, quantity: Decimal, unit_price: Money) {
        self.lines.push(QuoteLine::new(quantity, unit_price));
    }

    /// Sum of the rounded line subtotals.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// Subtotal, IVA and total for the whole quote.
    pub fn breakdown(&self) -> InvoiceBreakdown {
        InvoiceBreakdown::from_subtotal(self.subtotal())
    }

    /// Checks if the quote has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_invoice() {
        let subtotal = calculate_subtotal(dec!(10), Money::from_colones(1500, 0));
        assert_eq!(subtotal.to_decimal(), dec!(15000.00));

        let tax = calculate_tax(subtotal);
        assert_eq!(tax.to_decimal(), dec!(1950.00));

        let total = calculate_total(subtotal, tax);
        assert_eq!(total.to_decimal(), dec!(16950.00));
    }

    #[test]
    fn test_subtotal_rounds_half_up() {
        // 0.5 × ₡0.01 = 0.005 → ₡0.01
        assert_eq!(
            calculate_subtotal(dec!(0.5), Money::from_centimos(1)),
            Money::from_centimos(1)
        );
        // 0.333 × ₡10.00 = 3.33
        assert_eq!(
            calculate_subtotal(dec!(0.333), Money::from_colones(10, 0)),
            Money::from_centimos(333)
        );
    }

    #[test]
    fn test_negative_inputs_produce_credits() {
        let credit = calculate_subtotal(dec!(-2), Money::from_colones(1000, 0));
        assert_eq!(credit, Money::from_colones(-2000, 0));

        let breakdown = InvoiceBreakdown::from_subtotal(credit);
        assert_eq!(breakdown.tax, Money::from_colones(-260, 0));
        assert_eq!(breakdown.total, Money::from_colones(-2260, 0));
    }

    #[test]
    fn test_area_breakdown() {
        let quote = InvoiceBreakdown::for_area(dec!(12.5), Money::from_colones(45_000, 0));
        assert_eq!(quote.subtotal, Money::from_colones(562_500, 0));
        assert_eq!(quote.tax, Money::from_colones(73_125, 0));
        assert_eq!(quote.total, Money::from_colones(635_625, 0));
    }

    #[test]
    fn test_area_breakdown_with_fractional_result() {
        // 3.33 m² × ₡12 345.67 = 41 111.0811 → 41 111.08
        let quote = InvoiceBreakdown::for_area(dec!(3.33), Money::from_colones(12_345, 67));
        assert_eq!(quote.subtotal, Money::from_centimos(4_111_108));
        // 41 111.08 × 0.13 = 5 344.4404 → 5 344.44
        assert_eq!(quote.tax, Money::from_centimos(534_444));
        assert_eq!(quote.total, Money::from_centimos(4_645_552));
    }

    #[test]
    fn test_quote_rounds_each_line_then_taxes_once() {
        let mut quote = Quote::new();
        assert!(quote.is_empty());

        quote.push(dec!(2), Money::from_colones(1500, 0));
        quote.push(dec!(0.5), Money::from_centimos(333)); // 1.665 → 1.67

        assert_eq!(quote.subtotal(), Money::from_centimos(300_167));

        let breakdown = quote.breakdown();
        // 3001.67 × 0.13 = 390.2171 → 390.22
        assert_eq!(breakdown.tax, Money::from_centimos(39_022));
        assert_eq!(breakdown.total, Money::from_centimos(339_189));
    }

    #[test]
    fn test_empty_quote() {
        let breakdown = Quote::new().breakdown();
        assert!(breakdown.subtotal.is_zero());
        assert!(breakdown.tax.is_zero());
        assert!(breakdown.total.is_zero());
    }

    proptest! {
        #[test]
        fn prop_total_is_subtotal_plus_tax(
            quantity_milli in -1_000_000i64..1_000_000,
            price_centimos in -100_000_000i64..100_000_000,
        ) {
            let quantity = Decimal::new(quantity_milli, 3);
            let breakdown = InvoiceBreakdown::for_area(quantity, Money::from_centimos(price_centimos));

            prop_assert_eq!(breakdown.total, breakdown.subtotal + breakdown.tax);
            prop_assert_eq!(breakdown.tax, calculate_tax(breakdown.subtotal));

            // never more than two decimal digits
            prop_assert!(breakdown.total.to_decimal().scale() <= 2);

            // the subtotal is the exact product rounded to the nearest céntimo
            let exact = quantity * Decimal::from(price_centimos);
            let error = (exact - Decimal::from(breakdown.subtotal.centimos())).abs();
            prop_assert!(error <= dec!(0.5));
        }
    }
}
