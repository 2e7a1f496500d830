//! # Configuration State
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--catalog`, `--db`, `--page-size`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization.

use std::path::PathBuf;
use storefront_core::validation::validate_page_size;
use storefront_core::{Money, ValidationError, DEFAULT_PAGE_SIZE};
use tracing::warn;

/// Catalog file used when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "product.json";

pub const ENV_CATALOG: &str = "STOREFRONT_CATALOG";
pub const ENV_DB_PATH: &str = "STOREFRONT_DB_PATH";
pub const ENV_PAGE_SIZE: &str = "STOREFRONT_PAGE_SIZE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigState {
    /// Catalog JSON file, read once at startup.
    pub catalog_path: PathBuf,

    /// SQLite file for the saved cart.
    /// `None`: the platform data directory is used.
    pub database_path: Option<PathBuf>,

    /// Products revealed per "load more" step.
    pub page_size: usize,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            database_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_CATALOG`: catalog file path
    /// - `STOREFRONT_DB_PATH`: database file path
    /// - `STOREFRONT_PAGE_SIZE`: page size (ignored with a warning if invalid)
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup(ENV_CATALOG) {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(size) if validate_page_size(size).is_ok() => config.page_size = size,
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_PAGE_SIZE),
            }
        }

        config
    }

    /// Applies command-line overrides on top of the current values.
    ///
    /// ## Returns
    /// * `Err(ValidationError::OutOfRange)` - page size outside 1..=MAX_PAGE_SIZE
    pub fn with_overrides(
        mut self,
        catalog_path: Option<PathBuf>,
        database_path: Option<PathBuf>,
        page_size: Option<usize>,
    ) -> Result<Self, ValidationError> {
        if let Some(path) = catalog_path {
            self.catalog_path = path;
        }
        if let Some(path) = database_path {
            self.database_path = Some(path);
        }
        if let Some(size) = page_size {
            validate_page_size(size)?;
            self.page_size = size;
        }
        Ok(self)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.format_currency(amount.cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config.catalog_path, PathBuf::from("product.json"));
        assert_eq!(config.database_path, None);
        assert_eq!(config.page_size, 6);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            (ENV_CATALOG, "/srv/catalog.json"),
            (ENV_DB_PATH, "/tmp/cart.db"),
            (ENV_PAGE_SIZE, "12"),
        ]));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/cart.db")));
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn test_invalid_env_page_size_ignored() {
        for raw in ["0", "-3", "lots", "100000"] {
            let config = ConfigState::from_lookup(lookup(&[(ENV_PAGE_SIZE, raw)]));
            assert_eq!(config.page_size, DEFAULT_PAGE_SIZE, "value {:?}", raw);
        }
    }

    #[test]
    fn test_flags_win_over_environment() {
        let config = ConfigState::from_lookup(lookup(&[(ENV_PAGE_SIZE, "12")]))
            .with_overrides(Some(PathBuf::from("other.json")), None, Some(3))
            .unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("other.json"));
        assert_eq!(config.page_size, 3);

        assert!(ConfigState::default().with_overrides(None, None, Some(0)).is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1234), "-$12.34");
        assert_eq!(config.format_money(Money::from_cents(7398)), "$73.98");
    }
}
