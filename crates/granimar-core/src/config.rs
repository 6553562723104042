//! # Formatting Configuration
//!
//! The locale and currency used by every display helper.
//!
//! The default is `es-CR` / `CRC`. The free functions in [`crate::format`]
//! use the default; the methods on [`FormatConfig`] use whatever is passed.
//!
//! ```toml
//! # granimar.toml
//! [format]
//! locale = "es-CR"
//! currency = "CRC"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Locale
// =============================================================================

/// Display locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    /// Costa Rican Spanish: `₡1 234,56`, `15 de marzo de 2024`.
    #[default]
    #[serde(rename = "es-CR")]
    EsCr,
    /// US English: `₡1,234.56`, `March 15, 2024`.
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EsCr, Locale::EnUs];

    /// BCP 47 tag.
    pub const fn tag(&self) -> &'static str {
        match self {
            Locale::EsCr => "es-CR",
            Locale::EnUs => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    /// Tags compare case-insensitively and accept `_` for `-` (`es_cr`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "locale".to_string(),
                allowed: Locale::ALL.iter().map(|l| l.tag().to_string()).collect(),
            })
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Display currency (ISO 4217).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Costa Rican colón.
    #[default]
    Crc,
    /// US dollar.
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Crc, Currency::Usd];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Crc => "CRC",
            Currency::Usd => "USD",
        }
    }

    /// Symbol placed before the amount.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Crc => "₡",
            Currency::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

// =============================================================================
// Format Config
// =============================================================================

/// Locale + currency pair handed to the formatting functions.
///
/// ## Default Values
/// - Locale: `es-CR`
/// - Currency: `CRC` (₡)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct FormatConfig {
    pub locale: Locale,
    pub currency: Currency,
}

impl FormatConfig {
    /// Creates a config for a specific locale and currency.
    pub const fn new(locale: Locale, currency: Currency) -> Self {
        FormatConfig { locale, currency }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_costa_rica() {
        let config = FormatConfig::default();
        assert_eq!(config.locale, Locale::EsCr);
        assert_eq!(config.currency, Currency::Crc);
        assert_eq!(config.currency.symbol(), "₡");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("es-CR".parse::<Locale>().unwrap(), Locale::EsCr);
        assert_eq!("en_us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!(" ES-cr ".parse::<Locale>().unwrap(), Locale::EsCr);
        assert!(matches!(
            "fr-FR".parse::<Locale>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("CRC".parse::<Currency>().unwrap(), Currency::Crc);
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let config = FormatConfig::new(Locale::EnUs, Currency::Usd);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"locale":"en-US","currency":"USD"}"#);

        let partial: FormatConfig = serde_json::from_str(r#"{"currency":"USD"}"#).unwrap();
        assert_eq!(partial, FormatConfig::new(Locale::EsCr, Currency::Usd));
    }
}
