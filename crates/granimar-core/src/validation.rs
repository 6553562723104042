//! # Validation Module
//!
//! Input validation for the client, product and invoice forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (on blur / on submit)                                   │
//! │  ├── validate_email, validate_cedula      → bool, field highlighting   │
//! │  └── validate_required                    → first empty field          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request body (REST API)                                      │
//! │  └── THIS MODULE: field rules + normalization                          │
//! │      (title-cased names, lower-cased invoice email)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  └── NOT NULL / UNIQUE (cedula, codigo, numero_factura)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use granimar_core::validation::{validate_email, validate_square_metres};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_email("a@b.com"));
//! assert!(validate_square_metres(Decimal::new(125, 1)).is_ok());
//! ```

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;
use tracing::debug;

use crate::cedula::CEDULA_LENGTH;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum length of `nombre` / `apellidos` after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

// =============================================================================
// Email
// =============================================================================

/// Structural email check: `local@domain.tld`, no whitespace, one `@`.
///
/// Pattern: `^[^\s@]+@[^\s@]+\.[^\s@]+$`. This is a sanity check for typos,
/// not RFC 5322 validation, and nothing is looked up over the network.
///
/// ## Example
/// ```rust
/// use granimar_core::validation::validate_email;
///
/// assert!(validate_email("a@b.com"));
/// assert!(!validate_email("a@b"));
/// assert!(!validate_email("a b@c.com"));
/// ```
pub fn validate_email(value: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    });
    let valid = re.is_match(value);
    if !valid {
        debug!(len = value.len(), "Email rejected");
    }
    valid
}

/// On-blur rule of the invoice form: an empty email is fine, a typed one
/// must pass [`validate_email`].
pub fn validate_optional_email(value: &str) -> ValidationResult<()> {
    let value = value.trim();
    if value.is_empty() || validate_email(value) {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.tld".to_string(),
    })
}

/// Normalizes `email_cliente` of a new invoice.
///
/// ## Rules
/// - Must not be empty
/// - Must contain `@`
///
/// ## Returns
/// The address lower-cased and trimmed.
pub fn normalize_invoice_email(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "email_cliente".to_string(),
        });
    }

    if !value.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email_cliente".to_string(),
            reason: "must contain '@'".to_string(),
        });
    }

    Ok(value.to_lowercase())
}

// =============================================================================
// Client Validators
// =============================================================================

/// Validates `nombre` or `apellidos`.
///
/// ## Rules
/// - At least 2 characters after trimming
///
/// ## Returns
/// The trimmed value in title case (`"maría josé"` → `"María José"`).
///
/// ## Example
/// ```rust
/// use granimar_core::validation::validate_person_name;
///
/// assert_eq!(validate_person_name("nombre", "  ana  ").unwrap(), "Ana");
/// assert!(validate_person_name("apellidos", "x").is_err());
/// ```
pub fn validate_person_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: MIN_NAME_LENGTH,
        });
    }

    Ok(title_case(value))
}

/// Server-side `cedula` rule: at least 9 characters.
///
/// This is deliberately weaker than [`crate::cedula::validate_cedula`]; dashed
/// input (`4-0156-0651`) passes both.
pub fn validate_cedula_field(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "cedula".to_string(),
        });
    }

    if value.chars().count() < CEDULA_LENGTH {
        return Err(ValidationError::TooShort {
            field: "cedula".to_string(),
            min: CEDULA_LENGTH,
        });
    }

    Ok(())
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// A word starts after any non-alphabetic character.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if previous_is_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_is_letter = ch.is_alphabetic();
    }
    out
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn require_positive(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// `precio_unitario` of a product must be > 0.
pub fn validate_unit_price(price: Decimal) -> ValidationResult<()> {
    require_positive("precio_unitario", price)
}

/// `metros_cuadrados` of an invoice must be > 0.
pub fn validate_square_metres(square_metres: Decimal) -> ValidationResult<()> {
    require_positive("metros_cuadrados", square_metres)
}

/// `precio_por_metro` of an invoice must be > 0.
pub fn validate_price_per_metre(price: Decimal) -> ValidationResult<()> {
    require_positive("precio_por_metro", price)
}

/// `stock` of a product cannot be negative. Zero is allowed.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// `cantidad` of an invoice line must be > 0.
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "cantidad".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Checks that every required `(field, value)` pair is non-blank.
///
/// Reports the first blank field, in the order given.
///
/// ## Example
/// ```rust
/// use granimar_core::validation::validate_required;
///
/// let form = [("nombre", "Ana"), ("cedula", "  ")];
/// let err = validate_required(&form).unwrap_err();
/// assert_eq!(err.to_string(), "cedula is required");
/// ```
pub fn validate_required(fields: &[(&str, &str)]) -> ValidationResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ValidationError::Required {
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("ventas@granimar.co.cr"));
        assert!(validate_email("first.last+tag@example.org"));

        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@b c.com"));
        assert!(!validate_email("a@@b.com"));
        assert!(!validate_email("@b.com"));
        assert!(!validate_email("a@.com"));
        assert!(!validate_email("a@b."));
        assert!(!validate_email(""));
        assert!(!validate_email(" a@b.com"));
        assert!(!validate_email("a@b.com\n"));
    }

    #[test]
    fn test_validate_optional_email() {
        assert!(validate_optional_email("").is_ok());
        assert!(validate_optional_email("   ").is_ok());
        assert!(validate_optional_email(" a@b.com ").is_ok());
        assert!(matches!(
            validate_optional_email("a@b"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_invoice_email() {
        assert_eq!(
            normalize_invoice_email("  Ana.Mora@Example.COM ").unwrap(),
            "ana.mora@example.com"
        );
        assert!(matches!(
            normalize_invoice_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            normalize_invoice_email("ana.example.com"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_person_name() {
        assert_eq!(validate_person_name("nombre", "maría josé").unwrap(), "María José");
        assert_eq!(validate_person_name("apellidos", "O'NEIL").unwrap(), "O'Neil");
        assert_eq!(validate_person_name("nombre", "  li ").unwrap(), "Li");

        assert!(matches!(
            validate_person_name("nombre", "  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_person_name("apellidos", " é "),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
    }

    #[test]
    fn test_validate_cedula_field() {
        assert!(validate_cedula_field("401560651").is_ok());
        assert!(validate_cedula_field("4-0156-0651").is_ok());
        assert!(validate_cedula_field("12345678").is_err());
        assert!(matches!(
            validate_cedula_field(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_unit_price(dec!(0.01)).is_ok());
        assert!(validate_unit_price(dec!(0)).is_err());
        assert!(validate_unit_price(dec!(-5)).is_err());

        assert!(validate_square_metres(dec!(12.5)).is_ok());
        assert!(validate_square_metres(dec!(0)).is_err());

        assert!(validate_price_per_metre(dec!(45000)).is_ok());
        assert!(validate_price_per_metre(dec!(-1)).is_err());

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());

        assert!(validate_line_quantity(1).is_ok());
        assert!(validate_line_quantity(0).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required(&[]).is_ok());
        assert!(validate_required(&[("nombre", "Ana"), ("apellidos", "Mora")]).is_ok());

        let err = validate_required(&[("nombre", ""), ("apellidos", "")]).unwrap_err();
        assert_eq!(err.to_string(), "nombre is required");
    }
}
