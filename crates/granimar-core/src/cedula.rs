//! # Cédula (Costa Rican National ID)
//!
//! Checksum validation and canonical `D-DDDD-DDDD` formatting.
//!
//! ## Checksum
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  digits:   4   0   1   5   6   0   6   5 │ 1                            │
//! │  weights:  3   4   5   6   7   8   9   2 │                              │
//! │  products: 12  0   5   30  42  0   54  10 → sum 153                     │
//! │                                                                         │
//! │  153 mod 11 = 10 → check = 11 - 10 = 1   (remainders 0 and 1 are kept)  │
//! │                                                                         │
//! │  valid iff check == 9th digit            → "401560651" ✔ "401560656" ✘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input may carry dashes or spaces: every non-ASCII-digit character is
//! stripped before anything else happens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Digits in a cédula.
pub const CEDULA_LENGTH: usize = 9;

const WEIGHTS: [u32; 8] = [3, 4, 5, 6, 7, 8, 9, 2];

/// Keeps ASCII digits only.
fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check digit for the first eight digits of a cédula.
///
/// ## Example
/// ```rust
/// use granimar_core::cedula::check_digit;
///
/// assert_eq!(check_digit([4, 0, 1, 5, 6, 0, 6, 5]), 1);
/// ```
pub fn check_digit(prefix: [u8; 8]) -> u8 {
    let sum: u32 = prefix
        .iter()
        .zip(WEIGHTS)
        .map(|(&digit, weight)| u32::from(digit) * weight)
        .sum();
    let remainder = sum % 11;
    let check = if remainder < 2 { remainder } else { 11 - remainder };
    check as u8
}

/// Validates a cédula checksum.
///
/// Returns `false` for anything that is not exactly nine digits once
/// non-digits are stripped.
///
/// ## Example
/// ```rust
/// use granimar_core::cedula::validate_cedula;
///
/// assert!(validate_cedula("4-0156-0651"));
/// assert!(!validate_cedula("401560656"));  // wrong check digit
/// assert!(!validate_cedula("12345"));      // wrong length
/// ```
pub fn validate_cedula(raw: &str) -> bool {
    let digits: Vec<u8> = raw
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let Ok(all) = <[u8; CEDULA_LENGTH]>::try_from(digits.as_slice()) else {
        debug!(digits = digits.len(), "Cédula rejected: wrong length");
        return false;
    };

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&all[..8]);

    let valid = check_digit(prefix) == all[8];
    if !valid {
        debug!("Cédula rejected: check digit mismatch");
    }
    valid
}

/// Formats a cédula as `D-DDDD-DDDD`.
///
/// Anything other than nine digits is returned stripped but undashed.
///
/// ## Example
/// ```rust
/// use granimar_core::cedula::format_cedula;
///
/// assert_eq!(format_cedula("401560651"), "4-0156-0651");
/// assert_eq!(format_cedula("4 0156 0651"), "4-0156-0651");
/// assert_eq!(format_cedula("abc123456"), "123456");
/// ```
pub fn format_cedula(raw: &str) -> String {
    let digits = strip_non_digits(raw);
    if digits.len() != CEDULA_LENGTH {
        return digits;
    }
    format!("{}-{}-{}", &digits[..1], &digits[1..5], &digits[5..])
}

// =============================================================================
// Cedula Newtype
// =============================================================================

/// A cédula whose checksum has been verified.
///
/// Holds the nine bare digits; `Display` renders the dashed form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "String", into = "String")]
pub struct Cedula(String);

impl Cedula {
    /// Parses and checks a cédula.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let digits = strip_non_digits(raw);

        if digits.is_empty() {
            return Err(ValidationError::Required {
                field: "cedula".to_string(),
            });
        }

        if digits.len() != CEDULA_LENGTH {
            return Err(ValidationError::InvalidFormat {
                field: "cedula".to_string(),
                reason: format!("must have {} digits, got {}", CEDULA_LENGTH, digits.len()),
            });
        }

        if !validate_cedula(&digits) {
            return Err(ValidationError::InvalidFormat {
                field: "cedula".to_string(),
                reason: "check digit does not match".to_string(),
            });
        }

        Ok(Cedula(digits))
    }

    /// The nine digits without dashes.
    #[inline]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// `D-DDDD-DDDD`.
    #[inline]
    pub fn formatted(&self) -> String {
        format_cedula(&self.0)
    }
}

impl fmt::Display for Cedula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cedula {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cedula::parse(s)
    }
}

impl TryFrom<String> for Cedula {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cedula::parse(&value)
    }
}

impl From<Cedula> for String {
    fn from(cedula: Cedula) -> Self {
        cedula.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Appends the computed check digit to an eight-digit prefix.
    fn with_check_digit(prefix: [u8; 8]) -> String {
        let mut digits: String = prefix.iter().map(|d| char::from(b'0' + d)).collect();
        digits.push(char::from(b'0' + check_digit(prefix)));
        digits
    }

    #[test]
    fn test_reference_vector_mismatch() {
        // sum 153, 153 mod 11 = 10, check 1, ninth digit 6
        assert_eq!(check_digit([4, 0, 1, 5, 6, 0, 6, 5]), 1);
        assert!(!validate_cedula("401560656"));
    }

    #[test]
    fn test_valid_vectors() {
        assert!(validate_cedula("401560651"));
        assert!(validate_cedula("4-0156-0651"));
        // sum 3 → check 8
        assert!(validate_cedula("100000008"));
        // sum 6 → check 5
        assert!(validate_cedula("200000005"));
    }

    #[test]
    fn test_low_remainders_are_kept() {
        // sum 0 → remainder 0 → check 0
        assert!(validate_cedula("000000000"));
        // sum 12 → remainder 1 → check 1
        assert_eq!(check_digit([4, 0, 0, 0, 0, 0, 0, 0]), 1);
        assert!(validate_cedula("400000001"));
        assert!(!validate_cedula("400000010"));
    }

    #[test]
    fn test_length_rejection() {
        assert!(!validate_cedula("12345"));
        assert!(!validate_cedula("abc123456"));
        assert!(!validate_cedula(""));
        assert!(!validate_cedula("4015606510"));
    }

    #[test]
    fn test_non_ascii_digits_are_stripped() {
        // Arabic-Indic digits are not ASCII digits
        assert!(!validate_cedula("٤٠١٥٦٠٦٥١"));
        assert_eq!(format_cedula("٤٠١"), "");
    }

    #[test]
    fn test_format_cedula() {
        assert_eq!(format_cedula("401560651"), "4-0156-0651");
        assert_eq!(format_cedula("4.0156.0651"), "4-0156-0651");
        assert_eq!(format_cedula("12345"), "12345");
        assert_eq!(format_cedula("1-2345"), "12345");
        assert_eq!(format_cedula("1234567890"), "1234567890");
    }

    #[test]
    fn test_format_cedula_is_idempotent_on_nine_digits() {
        let once = format_cedula("401560656");
        assert_eq!(format_cedula(&once), once);
    }

    #[test]
    fn test_cedula_parse() {
        let cedula = Cedula::parse("4-0156-0651").unwrap();
        assert_eq!(cedula.digits(), "401560651");
        assert_eq!(cedula.to_string(), "4-0156-0651");

        assert!(matches!(
            Cedula::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Cedula::parse("12345"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "401560656".parse::<Cedula>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_cedula_serde() {
        let cedula: Cedula = serde_json::from_str("\"4-0156-0651\"").unwrap();
        assert_eq!(serde_json::to_string(&cedula).unwrap(), "\"401560651\"");
        assert!(serde_json::from_str::<Cedula>("\"401560656\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_computed_check_digit_validates(prefix in proptest::array::uniform8(0u8..10)) {
            let digits = with_check_digit(prefix);
            prop_assert!(validate_cedula(&digits));
            prop_assert!(Cedula::parse(&digits).is_ok());
        }

        #[test]
        fn prop_formatting_preserves_validity(digits in "[0-9]{9}") {
            let formatted = format_cedula(&digits);
            prop_assert_eq!(formatted.len(), 11);
            prop_assert_eq!(validate_cedula(&formatted), validate_cedula(&digits));
            prop_assert_eq!(formatted.replace('-', ""), digits.clone());
            prop_assert_eq!(format_cedula(&formatted), formatted);
        }

        #[test]
        fn prop_wrong_length_never_validates(digits in "[0-9]{0,8}|[0-9]{10,14}") {
            prop_assert!(!validate_cedula(&digits));
            prop_assert_eq!(format_cedula(&digits), digits);
        }
    }
}
