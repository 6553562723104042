//! # Invoice Statistics
//!
//! The summary block of the invoice list page: how many invoices, how much
//! was billed, the average job size, and a per-status breakdown.
//!
//! ```text
//! ┌──────────────┬──────────────┬────────────────┐
//! │ 12 facturas  │ ₡8 420 000   │ 14,35 m² prom. │
//! ├──────────────┴──────────────┴────────────────┤
//! │ PENDIENTE 3 · ENVIADA 4 · PAGADA 5           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The dashboard figures ([`DashboardStats`], [`monthly_sales`]) leave voided
//! invoices out of every sales total.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::format::MONTHS_ES;
use crate::money::Money;
use crate::types::{Invoice, InvoiceStatus};

/// Count and billed amount for one invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusTotals {
    #[serde(rename = "estado")]
    pub status: InvoiceStatus,
    #[serde(rename = "cantidad")]
    pub count: usize,
    #[serde(rename = "total_monto")]
    pub total: Money,
}

/// Aggregate figures over a set of invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSummary {
    #[serde(rename = "total_facturas")]
    pub total_invoices: usize,
    #[serde(rename = "total_ventas")]
    pub total_sales: Money,
    /// Rounded to 2 decimals, ties to even.
    #[serde(rename = "promedio_metros_cuadrados")]
    #[ts(type = "number")]
    pub average_square_metres: Decimal,
    /// Only statuses that occur, in [`InvoiceStatus::ALL`] order.
    #[serde(rename = "estadisticas_por_estado")]
    pub by_status: Vec<StatusTotals>,
}

impl InvoiceSummary {
    /// Summarizes `invoices`. Voided invoices are counted like any other.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::stats::InvoiceSummary;
    ///
    /// let summary = InvoiceSummary::from_invoices(&[]);
    /// assert_eq!(summary.total_invoices, 0);
    /// assert!(summary.by_status.is_empty());
    /// ```
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let total_sales = invoices
            .iter()
            .fold(Money::zero(), |acc, invoice| {
                acc.saturating_add(invoice.total_amount())
            });

        let average_square_metres = if invoices.is_empty() {
            Decimal::ZERO
        } else {
            let area = invoices
                .iter()
                .fold(Decimal::ZERO, |acc, invoice| {
                    acc.saturating_add(invoice.metros_cuadrados)
                });
            (area / Decimal::from(invoices.len()))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        };

        let by_status = InvoiceStatus::ALL
            .into_iter()
            .filter_map(|status| {
                let matching = invoices.iter().filter(|invoice| invoice.estado == status);
                let (count, total) = matching.fold((0, Money::zero()), |(n, sum), invoice| {
                    (n + 1, sum.saturating_add(invoice.total_amount()))
                });
                (count > 0).then_some(StatusTotals {
                    status,
                    count,
                    total,
                })
            })
            .collect();

        InvoiceSummary {
            total_invoices: invoices.len(),
            total_sales,
            average_square_metres,
            by_status,
        }
    }
}

/// Headline cards of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    /// Billed since the start of the month, voided invoices excluded.
    #[serde(rename = "total_ventas_mes")]
    pub sales_this_month: Money,
    #[serde(rename = "total_facturas_mes")]
    pub invoices_this_month: usize,
    /// Pending invoices of any date.
    #[serde(rename = "facturas_pendientes")]
    pub pending_invoices: usize,
}

impl DashboardStats {
    /// Computes the cards for the month beginning on `month_start`.
    ///
    /// An invoice belongs to the month when it was issued at or after
    /// midnight of `month_start` and is not voided.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use granimar_core::stats::DashboardStats;
    ///
    /// let month_start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let stats = DashboardStats::from_invoices(&[], month_start);
    /// assert_eq!(stats.invoices_this_month, 0);
    /// assert!(stats.sales_this_month.is_zero());
    /// ```
    pub fn from_invoices(invoices: &[Invoice], month_start: NaiveDate) -> Self {
        let from = month_start.and_time(chrono::NaiveTime::MIN);

        let mut stats = invoices
            .iter()
            .filter(|invoice| invoice.fecha_emision >= from && !invoice.estado.is_voided())
            .fold(DashboardStats::default(), |mut stats, invoice| {
                stats.sales_this_month = stats.sales_this_month.saturating_add(invoice.total_amount());
                stats.invoices_this_month += 1;
                stats
            });

        stats.pending_invoices = invoices
            .iter()
            .filter(|invoice| invoice.estado == InvoiceStatus::Pendiente)
            .count();

        trace!(?month_start, ?stats, "Dashboard stats computed");
        stats
    }
}

/// Sales of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlySales {
    #[serde(rename = "anio")]
    pub year: i32,
    /// 1 to 12.
    #[serde(rename = "numero_mes")]
    pub month: u32,
    /// `"Marzo 2024"`.
    #[serde(rename = "mes")]
    pub label: String,
    #[serde(rename = "total_ventas")]
    pub total_sales: Money,
    #[serde(rename = "total_facturas")]
    pub invoice_count: usize,
}

impl MonthlySales {
    fn new(year: i32, month: u32) -> Self {
        MonthlySales {
            year,
            month,
            label: month_label(year, month),
            total_sales: Money::zero(),
            invoice_count: 0,
        }
    }
}

/// Groups the non-voided invoices issued on or after `since` by calendar
/// month, oldest month first. Months without sales are absent.
///
/// The dashboard chart passes the date one year back from today.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use granimar_core::stats::monthly_sales;
///
/// let since = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();
/// assert!(monthly_sales(&[], since).is_empty());
/// ```
pub fn monthly_sales(invoices: &[Invoice], since: NaiveDate) -> Vec<MonthlySales> {
    let from = since.and_time(chrono::NaiveTime::MIN);
    let mut months: BTreeMap<(i32, u32), MonthlySales> = BTreeMap::new();

    for invoice in invoices
        .iter()
        .filter(|invoice| invoice.fecha_emision >= from && !invoice.estado.is_voided())
    {
        let issued = invoice.fecha_emision.date();
        let entry = months
            .entry((issued.year(), issued.month()))
            .or_insert_with(|| MonthlySales::new(issued.year(), issued.month()));
        entry.total_sales = entry.total_sales.saturating_add(invoice.total_amount());
        entry.invoice_count += 1;
    }

    months.into_values().collect()
}

fn month_label(year: i32, month: u32) -> String {
    let name = MONTHS_ES[(month as usize - 1) % 12];
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{} {}", first.to_uppercase(), chars.as_str(), year),
        None => year.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
