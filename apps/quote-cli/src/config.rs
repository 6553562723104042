//! # Quote CLI Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (`es-CR`, `CRC`)
//! 2. TOML file: `--config PATH`, else `GRANIMAR_CONFIG`
//! 3. Environment: `GRANIMAR_LOCALE`, `GRANIMAR_CURRENCY`
//!
//! ```toml
//! [format]
//! locale = "en-US"
//! currency = "CRC"
//! ```
//!
//! Unknown locales or currencies are errors, whether they come from the file
//! or from the environment.

use granimar_core::FormatConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Path of the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "GRANIMAR_CONFIG";
/// Overrides `format.locale`.
pub const LOCALE_ENV: &str = "GRANIMAR_LOCALE";
/// Overrides `format.currency`.
pub const CURRENCY_ENV: &str = "GRANIMAR_CURRENCY";

/// Quote CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Locale and currency of every printed amount and date.
    pub format: FormatConfig,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(config_path, |var| std::env::var(var).ok())
    }

    /// [`QuoteConfig::load`] with an injectable environment lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(|| env(CONFIG_ENV).map(PathBuf::from)) {
            info!(?path, "Loading quote config from file");
            let contents = std::fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
                path: path.clone(),
                source,
            })?;
            config = Self::from_toml(&contents)?;
        }

        config.apply_env_overrides(&env)?;

        debug!(
            locale = %config.format.locale,
            currency = %config.format.currency,
            "Quote config loaded"
        );
        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env_overrides<F>(&mut self, env: &F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = env(LOCALE_ENV) {
            self.format.locale = locale.parse().map_err(|source| CliError::ConfigEnv {
                var: LOCALE_ENV,
                source,
            })?;
            debug!(locale = %self.format.locale, "Overriding locale from environment");
        }

        if let Some(currency) = env(CURRENCY_ENV) {
            self.format.currency = currency.parse().map_err(|source| CliError::ConfigEnv {
                var: CURRENCY_ENV,
                source,
            })?;
            debug!(currency = %self.format.currency, "Overriding currency from environment");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use granimar_core::{Currency, Locale};
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "granimar-quote-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = QuoteConfig::load_with(None, env_from(&[])).unwrap();
        assert_eq!(config, QuoteConfig::default());
        assert_eq!(config.format.locale, Locale::EsCr);
        assert_eq!(config.format.currency, Currency::Crc);
    }

    #[test]
    fn test_from_toml() {
        let config = QuoteConfig::from_toml("[format]\nlocale = \"en-US\"\n").unwrap();
        assert_eq!(config.format.locale, Locale::EnUs);
        assert_eq!(config.format.currency, Currency::Crc);

        assert_eq!(QuoteConfig::from_toml("").unwrap(), QuoteConfig::default());
    }

    #[test]
    fn test_unknown_locale_in_file_is_an_error() {
        let err = QuoteConfig::from_toml("[format]\nlocale = \"fr-FR\"\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let path = write_temp_config(
            "env-overrides",
            "[format]\nlocale = \"en-US\"\ncurrency = \"USD\"\n",
        );

        let config =
            QuoteConfig::load_with(Some(path.clone()), env_from(&[(CURRENCY_ENV, "crc")])).unwrap();
        assert_eq!(config.format.locale, Locale::EnUs);
        assert_eq!(config.format.currency, Currency::Crc);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_config_path_from_env() {
        let path = write_temp_config("path-from-env", "[format]\ncurrency = \"USD\"\n");
        let path_str = path.to_string_lossy().into_owned();

        let config = QuoteConfig::load_with(None, env_from(&[(CONFIG_ENV, path_str.as_str())])).unwrap();
        assert_eq!(config.format.currency, Currency::Usd);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unknown_env_value_is_an_error() {
        let err = QuoteConfig::load_with(None, env_from(&[(LOCALE_ENV, "de-DE")])).unwrap_err();
        assert!(matches!(err, CliError::ConfigEnv { var: LOCALE_ENV, .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("granimar-quote-does-not-exist.toml");
        let err = QuoteConfig::load_with(Some(path), env_from(&[])).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }
}
