//! # Domain Types
//!
//! Core domain types shared by the REST API and the browser front end.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Client       │   │    Invoice      │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  cliente_id     │   │  id             │       │
//! │  │  cedula         │   │  numero_factura │   │  codigo         │       │
//! │  │  nombre         │   │  metros², ₡/m²  │   │  precio_unitario│       │
//! │  │  email          │   │  subtotal, IVA  │   │  stock          │       │
//! │  └─────────────────┘   │  estado         │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │  InvoiceStatus  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  PENDIENTE      │                             │
//! │  │  1300 = 13% IVA │   │  ENVIADA        │                             │
//! │  └─────────────────┘   │  PAGADA         │                             │
//! │                        │  ANULADA        │                             │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are the Spanish names the REST API uses. Amounts arrive as
//! JSON numbers and are held as `Decimal`; the `Money` accessors round them
//! to céntimos.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::billing::InvoiceBreakdown;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1300 bps = 13% (Costa Rican IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Costa Rican value-added tax (IVA), 13%.
    pub const IVA: TaxRate = TaxRate(1300);

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact percentage (13.00 for IVA).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::IVA
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// The status of an invoice (`estado`).
///
/// ## Lifecycle
/// ```text
///   PENDIENTE ──(email sent)──► ENVIADA ──► PAGADA
///       │                          │          │
///       └──────────(anular)────────┴──────────┴──► ANULADA
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Created, not yet sent to the client.
    #[default]
    Pendiente,
    /// Sent to the client by e-mail.
    Enviada,
    /// Paid.
    Pagada,
    /// Voided.
    Anulada,
}

impl InvoiceStatus {
    /// Every status, in the order statistics are reported.
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Pendiente,
        InvoiceStatus::Enviada,
        InvoiceStatus::Pagada,
        InvoiceStatus::Anulada,
    ];

    /// Wire name (`"PENDIENTE"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pendiente => "PENDIENTE",
            InvoiceStatus::Enviada => "ENVIADA",
            InvoiceStatus::Pagada => "PAGADA",
            InvoiceStatus::Anulada => "ANULADA",
        }
    }

    /// Checks if the invoice has been voided.
    #[inline]
    pub const fn is_voided(&self) -> bool {
        matches!(self, InvoiceStatus::Anulada)
    }

    /// Voids the invoice.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::types::InvoiceStatus;
    ///
    /// assert_eq!(InvoiceStatus::Pagada.void().unwrap(), InvoiceStatus::Anulada);
    /// assert!(InvoiceStatus::Anulada.void().is_err());
    /// ```
    pub fn void(self) -> CoreResult<InvoiceStatus> {
        if self.is_voided() {
            debug!(status = %self, "Refusing to void an already voided invoice");
            return Err(CoreError::AlreadyVoided);
        }
        Ok(InvoiceStatus::Anulada)
    }

    /// Status after the invoice e-mail went out: only `PENDIENTE` moves.
    pub const fn after_email_sent(self) -> InvoiceStatus {
        match self {
            InvoiceStatus::Pendiente => InvoiceStatus::Enviada,
            other => other,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "estado".to_string(),
                allowed: InvoiceStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client (`cliente`) as returned by `/api/clientes`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub id: i64,
    pub nombre: String,
    pub apellidos: String,
    /// National ID as entered; see [`crate::cedula`] for the checksum.
    pub cedula: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub direccion: Option<String>,
    #[ts(as = "String")]
    pub fecha_creacion: NaiveDateTime,
    /// 1 = active, 0 = inactive (soft delete).
    pub activo: i32,
}

impl Client {
    /// Returns "nombre apellidos".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellidos)
    }

    /// Checks if the client is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.activo != 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product (`producto`) as returned by `/api/productos`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,
    /// Business identifier, see [`crate::codes::product_code`].
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[ts(type = "number")]
    pub precio_unitario: Decimal,
    #[serde(default)]
    pub stock: i64,
    pub categoria: Option<String>,
    #[ts(as = "String")]
    pub fecha_creacion: NaiveDateTime,
    pub activo: i32,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_decimal(self.precio_unitario)
    }

    /// Checks if the product is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.activo != 0
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// An invoice (`factura`) as returned by `/api/facturas`.
///
/// Granimar bills by area: `metros_cuadrados × precio_por_metro` plus IVA.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub id: i64,
    /// `GR-YYYYMMDD-NNNN`, see [`crate::codes`].
    pub numero_factura: String,
    pub cliente_id: i64,
    #[ts(as = "String")]
    pub fecha_emision: NaiveDateTime,
    pub nombre_cliente: String,
    pub email_cliente: String,
    pub color_seleccionado: Option<String>,
    #[ts(type = "number")]
    pub metros_cuadrados: Decimal,
    #[ts(type = "number")]
    pub precio_por_metro: Decimal,
    pub descripcion_servicio: Option<String>,
    #[ts(type = "number")]
    pub subtotal: Decimal,
    #[ts(type = "number")]
    pub impuestos: Decimal,
    #[ts(type = "number")]
    pub total: Decimal,
    #[serde(default)]
    pub estado: InvoiceStatus,
    pub observaciones: Option<String>,
    pub imagen_modelo: Option<String>,
    /// 1 once the invoice e-mail went out.
    #[serde(default)]
    pub email_enviado: i32,
    #[ts(as = "Option<String>")]
    pub fecha_envio_email: Option<NaiveDateTime>,
}

impl Invoice {
    /// Stored subtotal as Money.
    #[inline]
    pub fn subtotal_amount(&self) -> Money {
        Money::from_decimal(self.subtotal)
    }

    /// Stored IVA as Money.
    #[inline]
    pub fn tax_amount(&self) -> Money {
        Money::from_decimal(self.impuestos)
    }

    /// Stored total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_decimal(self.total)
    }

    /// Recomputes subtotal, IVA and total from the area and price per metre.
    pub fn expected_breakdown(&self) -> InvoiceBreakdown {
        InvoiceBreakdown::for_area(
            self.metros_cuadrados,
            Money::from_decimal(self.precio_por_metro),
        )
    }

    /// Checks if the invoice e-mail has been sent.
    #[inline]
    pub fn email_sent(&self) -> bool {
        self.email_enviado != 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
