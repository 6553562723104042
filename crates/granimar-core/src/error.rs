//! # Error Types
//!
//! Domain-specific error types for granimar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  granimar-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations (invoice status)      │
//! │  └── ValidationError  - Form field validation failures                 │
//! │                                                                         │
//! │  quote-cli errors (separate crate)                                     │
//! │  └── CliError         - Config loading, argument parsing               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError / REST response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Does NOT Produce Errors
//! The display helpers and the boolean checks (`validate_cedula`,
//! `validate_email`, `format_*`) never fail. Malformed input yields `false`
//! or a fallback string, so the UI decides how to react.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invoice has already been voided.
    ///
    /// ## When This Occurs
    /// - Clicking "Anular" on an invoice whose status is `ANULADA`
    #[error("Invoice is already voided")]
    AlreadyVoided,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Field names match the REST API field names (`nombre`, `cedula`, ...).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad checksum, malformed invoice number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::AlreadyVoided.to_string(), "Invoice is already voided");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "cedula".to_string(),
        };
        assert_eq!(err.to_string(), "cedula is required");

        let err = ValidationError::TooShort {
            field: "nombre".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "nombre must be at least 2 characters");

        let err = ValidationError::NotAllowed {
            field: "estado".to_string(),
            allowed: vec!["PENDIENTE".to_string(), "PAGADA".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "estado must be one of: [\"PENDIENTE\", \"PAGADA\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "metros_cuadrados".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: metros_cuadrados must be positive"
        );
    }
}
