//! # Document Codes
//!
//! Invoice numbers and product codes assigned when a record is created.
//!
//! ```text
//! numero_factura:  GR-20240315-0042      prefix - issue date - random suffix
//! codigo:          MBS0651               initials + last 4 digits of the
//!                  ("mármol blanco sierra", creation time in ms)
//! ```
//!
//! Uniqueness is enforced by the database (`UNIQUE` columns); a collision
//! simply means the caller draws a new suffix.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use tracing::debug;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Prefix of every invoice number.
pub const INVOICE_PREFIX: &str = "GR";

/// Suffixes are drawn from `0..INVOICE_SUFFIX_RANGE`.
pub const INVOICE_SUFFIX_RANGE: u16 = 10_000;

const DATE_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Invoice Numbers
// =============================================================================

/// Builds `GR-YYYYMMDD-NNNN`. The suffix is reduced modulo 10 000.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use granimar_core::codes::invoice_number;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(invoice_number(date, 42), "GR-20240315-0042");
/// ```
pub fn invoice_number(date: NaiveDate, suffix: u16) -> String {
    format!(
        "{}-{}-{:04}",
        INVOICE_PREFIX,
        date.format(DATE_FORMAT),
        suffix % INVOICE_SUFFIX_RANGE
    )
}

/// Draws a random suffix and builds the invoice number for `date`.
pub fn generate_invoice_number<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let suffix = rng.random_range(0..INVOICE_SUFFIX_RANGE);
    let numero = invoice_number(date, suffix);
    debug!(numero_factura = %numero, "Generated invoice number");
    numero
}

/// Splits an invoice number back into its date and suffix.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use granimar_core::codes::parse_invoice_number;
///
/// let (date, suffix) = parse_invoice_number("GR-20240315-0042").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
/// assert_eq!(suffix, 42);
/// ```
pub fn parse_invoice_number(value: &str) -> ValidationResult<(NaiveDate, u16)> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "numero_factura".to_string(),
        reason: reason.to_string(),
    };

    let mut parts = value.trim().split('-');
    let (Some(prefix), Some(date), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected GR-YYYYMMDD-NNNN"));
    };

    if prefix != INVOICE_PREFIX {
        return Err(invalid("must start with GR"));
    }

    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("date must be YYYYMMDD"));
    }
    let date =
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid("date does not exist"))?;

    if suffix.len() != 4 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("suffix must be four digits"));
    }
    let suffix = suffix
        .parse::<u16>()
        .map_err(|_| invalid("suffix must be four digits"))?;

    Ok((date, suffix))
}

// =============================================================================
// Product Codes
// =============================================================================

/// Product code: the upper-cased first letter of each word of `name`
/// followed by the last four digits of `timestamp_millis`.
///
/// Words are separated by single spaces, so repeated spaces contribute
/// nothing.
///
/// ## Example
/// ```rust
/// use granimar_core::codes::product_code;
///
/// assert_eq!(product_code("mármol blanco sierra", 1_710_513_000_651), "MBS0651");
/// ```
pub fn product_code(name: &str, timestamp_millis: u64) -> String {
    let initials: String = name
        .to_uppercase()
        .split(' ')
        .filter_map(|word| word.chars().next())
        .collect();

    let stamp = timestamp_millis.to_string();
    let tail = &stamp[stamp.len().saturating_sub(4)..];

    format!("{initials}{tail}")
}

/// [`product_code`] stamped with the current time.
pub fn product_code_now(name: &str) -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    product_code(name, millis)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn march_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_invoice_number_padding() {
        assert_eq!(invoice_number(march_15(), 0), "GR-20240315-0000");
        assert_eq!(invoice_number(march_15(), 7), "GR-20240315-0007");
        assert_eq!(invoice_number(march_15(), 9999), "GR-20240315-9999");
        assert_eq!(invoice_number(march_15(), 10_042), "GR-20240315-0042");
    }

    #[test]
    fn test_generated_numbers_parse_back() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let numero = generate_invoice_number(march_15(), &mut rng);
            assert_eq!(numero.len(), "GR-20240315-0000".len());

            let (date, suffix) = parse_invoice_number(&numero).unwrap();
            assert_eq!(date, march_15());
            assert!(suffix < INVOICE_SUFFIX_RANGE);
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_invoice_number(march_15(), &mut StdRng::seed_from_u64(99));
        let b = generate_invoice_number(march_15(), &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_invoice_number_rejects_malformed() {
        for bad in [
            "",
            "GR-20240315",
            "XX-20240315-0042",
            "GR-2024315-0042",
            "GR-20240230-0042",
            "GR-20240315-42",
            "GR-20240315-00a2",
            "GR-20240315-0042-1",
        ] {
            assert!(
                matches!(
                    parse_invoice_number(bad),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_product_code() {
        assert_eq!(product_code("Granito Negro", 1_700_000_001_234), "GN1234");
        assert_eq!(product_code("cuarzo", 1_700_000_000_005), "C0005");
        assert_eq!(product_code("mármol blanco sierra", 1_710_513_000_651), "MBS0651");
    }

    #[test]
    fn test_product_code_edge_cases() {
        // double space yields an empty word, which has no initial
        assert_eq!(product_code("Granito  Negro", 1234), "GN1234");
        // short timestamps are used whole
        assert_eq!(product_code("Cuarzo", 42), "C42");
        assert_eq!(product_code("", 98765), "8765");
    }

    #[test]
    fn test_product_code_now_shape() {
        let code = product_code_now("Granito Negro");
        assert!(code.starts_with("GN"));
        assert_eq!(code.len(), 6);
        assert!(code[2..].bytes().all(|b| b.is_ascii_digit()));
    }
}
