//! # Display Formatting
//!
//! Currency and date rendering for tables, cards and the invoice preview.
//!
//! ## Output Samples
//! ```text
//! ┌──────────────────────┬──────────────────────────┬───────────────────────┐
//! │                      │ es-CR (default)          │ en-US                 │
//! ├──────────────────────┼──────────────────────────┼───────────────────────┤
//! │ format_currency      │ ₡1 234 567,89            │ ₡1,234,567.89         │
//! │ format_date          │ 15 de marzo de 2024      │ March 15, 2024        │
//! │ format_date_time     │ 15 mar 2024, 14:30       │ Mar 15, 2024, 14:30   │
//! │ unparsable date      │ Fecha inválida           │ Invalid date          │
//! │ NaN / ∞ amount       │ ₡0,00                    │ ₡0.00                 │
//! │ 1e17 amount          │ ₡100 000 … 000,00        │ ₡100,000,…,000.00     │
//! └──────────────────────┴──────────────────────────┴───────────────────────┘
//! ```
//! The es-CR group separator is a no-break space (U+00A0).
//!
//! None of these functions fail: malformed input renders a fallback.
//!
//! ## Usage
//! ```rust
//! use granimar_core::format::{format_currency, format_date};
//!
//! assert_eq!(format_currency(16950.0), "₡16\u{a0}950,00");
//! assert_eq!(format_date("2024-03-15"), "15 de marzo de 2024");
//! assert_eq!(format_date("not-a-date"), "Fecha inválida");
//! ```

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::config::{FormatConfig, Locale};
use crate::money::Money;

pub(crate) const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_ES_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Naive date-time layouts accepted besides RFC 3339.
/// `%.f` also matches an absent fractional part.
const DATE_TIME_LAYOUTS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

// =============================================================================
// Locale Tables
// =============================================================================

impl Locale {
    fn group_separator(&self) -> char {
        match self {
            Locale::EsCr => '\u{a0}',
            Locale::EnUs => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::EsCr => ',',
            Locale::EnUs => '.',
        }
    }

    fn month_name(&self, month0: u32) -> &'static str {
        let table = match self {
            Locale::EsCr => &MONTHS_ES,
            Locale::EnUs => &MONTHS_EN,
        };
        table[month0 as usize % 12]
    }

    fn month_abbreviation(&self, month0: u32) -> &'static str {
        let table = match self {
            Locale::EsCr => &MONTHS_ES_SHORT,
            Locale::EnUs => &MONTHS_EN_SHORT,
        };
        table[month0 as usize % 12]
    }

    /// Placeholder rendered for unparsable dates.
    pub const fn invalid_date(&self) -> &'static str {
        match self {
            Locale::EsCr => "Fecha inválida",
            Locale::EnUs => "Invalid date",
        }
    }
}

// =============================================================================
// Formatter
// =============================================================================

impl FormatConfig {
    /// Formats a JSON number (`f64`) as currency.
    ///
    /// The amount is rounded half-up to two decimals first. `NaN` and
    /// infinities render as zero.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::config::{Currency, FormatConfig, Locale};
    ///
    /// let config = FormatConfig::new(Locale::EnUs, Currency::Crc);
    /// assert_eq!(config.format_currency(1e17), "₡100,000,000,000,000,000.00");
    /// assert_eq!(config.format_currency(f64::NAN), "₡0.00");
    /// ```
    pub fn format_currency(&self, amount: f64) -> String {
        if let Some(money) = Money::from_f64(amount) {
            return self.format_money(money);
        }
        if !amount.is_finite() {
            return self.format_money(Money::zero());
        }

        // Past the i64 céntimo range every f64 is a whole number, so the
        // exact integer digits are the whole amount.
        let digits = format!("{:.0}", amount.abs());
        let negative = amount < 0.0 && digits.bytes().any(|b| b != b'0');
        self.render_amount(negative, &digits, 0)
    }

    /// Formats an amount: sign, symbol, grouped integer part, two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use granimar_core::config::{Currency, FormatConfig, Locale};
    /// use granimar_core::money::Money;
    ///
    /// let config = FormatConfig::new(Locale::EnUs, Currency::Crc);
    /// assert_eq!(config.format_money(Money::from_centimos(-123_456_789)), "-₡1,234,567.89");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let colones = amount.colones().unsigned_abs().to_string();
        self.render_amount(amount.is_negative(), &colones, amount.centimos_part())
    }

    fn render_amount(&self, negative: bool, integer_digits: &str, centimos: i64) -> String {
        format!(
            "{}{}{}{}{:02}",
            if negative { "-" } else { "" },
            self.currency.symbol(),
            group_thousands(integer_digits, self.locale.group_separator()),
            self.locale.decimal_separator(),
            centimos
        )
    }

    /// Long date (`15 de marzo de 2024`) from an ISO-8601 string.
    pub fn format_date(&self, input: &str) -> String {
        match parse_date_input(input) {
            Some(value) => self.format_naive_date(value.date()),
            None => self.locale.invalid_date().to_string(),
        }
    }

    /// Short date plus 24-hour time (`15 mar 2024, 14:30`) from an ISO-8601
    /// string.
    pub fn format_date_time(&self, input: &str) -> String {
        match parse_date_input(input) {
            Some(value) => self.format_naive_date_time(value),
            None => self.locale.invalid_date().to_string(),
        }
    }

    /// Long date from a calendar date.
    pub fn format_naive_date(&self, date: NaiveDate) -> String {
        let month = self.locale.month_name(date.month0());
        match self.locale {
            Locale::EsCr => format!("{} de {} de {}", date.day(), month, date.year()),
            Locale::EnUs => format!("{} {}, {}", month, date.day(), date.year()),
        }
    }

    /// Short date plus 24-hour time from a date-time.
    pub fn format_naive_date_time(&self, value: NaiveDateTime) -> String {
        let month = self.locale.month_abbreviation(value.month0());
        let date = match self.locale {
            Locale::EsCr => format!("{} {} {}", value.day(), month, value.year()),
            Locale::EnUs => format!("{} {}, {}", month, value.day(), value.year()),
        };
        format!("{}, {:02}:{:02}", date, value.hour(), value.minute())
    }
}

/// Parses the date shapes the REST API and the forms produce.
///
/// ## Accepted
/// - RFC 3339: `2024-03-15T14:30:00Z`, `2024-03-15T14:30:00-06:00`
/// - naive date-time: `2024-03-15T14:30:00.123456`, `2024-03-15 14:30:00`,
///   `2024-03-15T14:30`
/// - date: `2024-03-15` (midnight)
///
/// Offsets are kept as written: `…T23:30:00-06:00` stays on the 15th.
pub fn parse_date_input(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(value) = DateTime::parse_from_rfc3339(input) {
        return Some(value.naive_local());
    }

    DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Inserts `separator` every three digits from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Default-config Shortcuts
// =============================================================================

/// [`FormatConfig::format_currency`] with the default `es-CR` / `CRC`.
pub fn format_currency(amount: f64) -> String {
    FormatConfig::default().format_currency(amount)
}

/// [`FormatConfig::format_date`] with the default `es-CR` locale.
pub fn format_date(input: &str) -> String {
    FormatConfig::default().format_date(input)
}

/// [`FormatConfig::format_date_time`] with the default `es-CR` locale.
pub fn format_date_time(input: &str) -> String {
    FormatConfig::default().format_date_time(input)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Currency;

    const NBSP: char = '\u{a0}';

    fn en_us() -> FormatConfig {
        FormatConfig::new(Locale::EnUs, Currency::Crc)
    }

    #[test]
    fn test_format_currency_es_cr() {
        assert_eq!(format_currency(0.0), "₡0,00");
        assert_eq!(format_currency(999.5), "₡999,50");
        assert_eq!(format_currency(1234.5), format!("₡1{NBSP}234,50"));
        assert_eq!(
            format_currency(1234567.891),
            format!("₡1{NBSP}234{NBSP}567,89")
        );
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1500.0), format!("-₡1{NBSP}500,00"));
        assert_eq!(format_currency(-0.25), "-₡0,25");
        assert_eq!(en_us().format_currency(-1234.5), "-₡1,234.50");
    }

    #[test]
    fn test_format_currency_non_finite_falls_back_to_zero() {
        assert_eq!(format_currency(f64::NAN), "₡0,00");
        assert_eq!(format_currency(f64::INFINITY), "₡0,00");
        assert_eq!(format_currency(f64::NEG_INFINITY), "₡0,00");
        assert_eq!(en_us().format_currency(f64::NAN), "₡0.00");
    }

    #[test]
    fn test_format_currency_beyond_centimo_range() {
        let config = en_us();
        assert_eq!(config.format_currency(1e16), "₡10,000,000,000,000,000.00");
        assert_eq!(config.format_currency(1e17), "₡100,000,000,000,000,000.00");
        assert_eq!(
            config.format_currency(-2.5e18),
            "-₡2,500,000,000,000,000,000.00"
        );
        assert_eq!(
            config.format_currency(1e21),
            "₡1,000,000,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(1e17),
            format!("₡100{NBSP}000{NBSP}000{NBSP}000{NBSP}000{NBSP}000,00")
        );
    }

    #[test]
    fn test_format_currency_rounds_to_two_decimals() {
        assert_eq!(en_us().format_currency(0.125), "₡0.13");
        assert_eq!(en_us().format_currency(10.0), "₡10.00");
    }

    #[test]
    fn test_format_money_extremes() {
        let config = en_us();
        assert_eq!(
            config.format_money(Money::from_centimos(i64::MIN)),
            "-₡92,233,720,368,547,758.08"
        );
        assert_eq!(
            config.format_money(Money::from_centimos(i64::MAX)),
            "₡92,233,720,368,547,758.07"
        );
    }

    #[test]
    fn test_format_money_usd() {
        let config = FormatConfig::new(Locale::EnUs, Currency::Usd);
        assert_eq!(config.format_money(Money::from_centimos(123_456)), "$1,234.56");
    }

    #[test]
    fn test_format_date_long() {
        assert_eq!(format_date("2024-03-15"), "15 de marzo de 2024");
        assert_eq!(format_date("2024-09-01T08:00:00"), "1 de septiembre de 2024");
        assert_eq!(en_us().format_date("2024-03-15"), "March 15, 2024");
    }

    #[test]
    fn test_format_date_accepts_api_timestamps() {
        assert_eq!(format_date("2024-03-15T14:30:00.123456"), "15 de marzo de 2024");
        assert_eq!(format_date("2024-03-15 14:30:00"), "15 de marzo de 2024");
        assert_eq!(format_date("2024-12-31T23:30:00-06:00"), "31 de diciembre de 2024");
        assert_eq!(format_date("  2024-03-15T14:30:00Z "), "15 de marzo de 2024");
    }

    #[test]
    fn test_format_date_invalid_input() {
        assert_eq!(format_date("not-a-date"), "Fecha inválida");
        assert_eq!(format_date(""), "Fecha inválida");
        assert_eq!(format_date("2024-02-30"), "Fecha inválida");
        assert_eq!(en_us().format_date("15/03/2024"), "Invalid date");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2024-03-15T14:30:00"), "15 mar 2024, 14:30");
        assert_eq!(format_date_time("2024-09-05T07:05:59"), "5 sept 2024, 07:05");
        assert_eq!(format_date_time("2024-03-15"), "15 mar 2024, 00:00");
        assert_eq!(
            en_us().format_date_time("2024-03-15T14:30:00Z"),
            "Mar 15, 2024, 14:30"
        );
        assert_eq!(format_date_time("mañana"), "Fecha inválida");
    }

    #[test]
    fn test_parse_date_input() {
        let value = parse_date_input("2024-03-15T14:30").unwrap();
        assert_eq!((value.hour(), value.minute()), (14, 30));
        assert!(parse_date_input("2024-13-01").is_none());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0", ','), "0");
        assert_eq!(group_thousands("999", ','), "999");
        assert_eq!(group_thousands("1000", ','), "1,000");
        assert_eq!(group_thousands("1234567", ','), "1,234,567");
    }
}
