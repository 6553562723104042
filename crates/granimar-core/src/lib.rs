//! # granimar-core: Finance and ID Utilities for Granimar Facturación
//!
//! Pure business logic for the Granimar CR invoicing app: colón amounts,
//! 13 % IVA, cédula checks, email checks and the es-CR display formats.
//! Everything here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Granimar Facturación Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Clientes ──► Productos ──► Nueva factura ──► Dashboard       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST (JSON)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    REST API                                     │   │
//! │  │    /clientes, /productos, /facturas, /dashboard/estadisticas    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ granimar-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │ billing  │ │  format  │ │  cedula  │          │   │
//! │  │   │  Money   │ │ IVA 13 % │ │ ₡, fecha │ │ checksum │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │validation│ │  types   │ │  codes   │ │  stats   │          │   │
//! │  │   │  email   │ │ Invoice  │ │ GR-...   │ │ summary  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    granimar-quote (CLI)                         │   │
//! │  │              quick quotes, cédula and email checks              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer céntimo arithmetic
//! - [`billing`] - Subtotal, IVA and total
//! - [`format`] - Currency and date display strings
//! - [`config`] - Locale and currency used by the formatters
//! - [`cedula`] - Cédula checksum and formatting
//! - [`validation`] - Email and form field rules
//! - [`types`] - Records (Client, Product, Invoice) and invoice status
//! - [`codes`] - Invoice numbers and product codes
//! - [`stats`] - Invoice summary and dashboard statistics
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output (invoice number suffixes
//!    take the RNG as an argument)
//! 2. **No I/O**: database, network and file system access stay outside
//! 3. **Integer Money**: amounts are céntimos (i64), rounded half-up once per step
//! 4. **Total Functions**: the display helpers and boolean checks never panic
//!
//! ## Example Usage
//!
//! ```rust
//! use granimar_core::{calculate_subtotal, calculate_tax, calculate_total, format_money};
//! use granimar_core::{validate_cedula, validate_email, Money};
//! use rust_decimal::Decimal;
//!
//! // 10 m² at ₡1 500
//! let subtotal = calculate_subtotal(Decimal::from(10), Money::from_colones(1_500, 0));
//! let tax = calculate_tax(subtotal);
//! let total = calculate_total(subtotal, tax);
//!
//! assert_eq!(tax, Money::from_colones(1_950, 0));
//! assert_eq!(format_money(total), "₡16\u{a0}950,00");
//!
//! assert!(!validate_cedula("401560656"));
//! assert!(validate_email("ventas@granimar.cr"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cedula;
pub mod codes;
pub mod config;
pub mod error;
pub mod format;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use granimar_core::Money` instead of
// `use granimar_core::money::Money`

pub use billing::{calculate_subtotal, calculate_tax, calculate_total, InvoiceBreakdown, Quote};
pub use cedula::{format_cedula, validate_cedula, Cedula};
pub use config::{Currency, FormatConfig, Locale};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_currency, format_date, format_date_time};
pub use money::Money;
pub use stats::{monthly_sales, DashboardStats, InvoiceSummary, MonthlySales};
pub use types::*;
pub use validation::{validate_email, ValidationResult};

/// Formats a [`Money`] amount with the default `es-CR` / `CRC` config.
///
/// ## Example
/// ```rust
/// use granimar_core::{format_money, Money};
///
/// assert_eq!(format_money(Money::from_centimos(-550)), "-₡5,50");
/// ```
pub fn format_money(amount: Money) -> String {
    FormatConfig::default().format_money(amount)
}
