//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `DEVO_STORAGE_DIR` - Directory for persisted state (default: `.devo-store`)
//! - `DEVO_CART_KEY` - Storage key holding the cart (default: `cart`)
//! - `DEVO_STORAGE_QUOTA_BYTES` - Storage quota in bytes (default: 5242880)
//! - `DEVO_CURRENCY` - Display currency code (default: USD)
//! - `DEVO_LOCALE` - Display language tag (default: en)
//! - `DEVO_EXCHANGE_RATES` - Rate overrides, e.g. `EUR=0.92,GBP=0.79`
//! - `DEVO_CATALOG_PATH` - JSON or YAML catalog file (default: built-in catalog)

use std::path::PathBuf;

use devo_store_core::{CurrencyCode, ExchangeRates, Locale};
use thiserror::Error;

use crate::display::DisplaySettings;
use crate::storage::DEFAULT_QUOTA_BYTES;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No exchange rate configured for {0}")]
    MissingExchangeRate(CurrencyCode),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding persisted storage files
    pub storage_dir: PathBuf,
    /// Storage key for the persisted cart
    pub cart_key: String,
    /// Storage quota in bytes
    pub storage_quota_bytes: usize,
    /// Display currency
    pub currency: CurrencyCode,
    /// Display language
    pub locale: Locale,
    /// Base-to-display conversion rates
    pub exchange_rates: ExchangeRates,
    /// Optional catalog file; `None` uses the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".devo-store"),
            cart_key: "cart".to_string(),
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            currency: CurrencyCode::BASE,
            locale: Locale::default(),
            exchange_rates: ExchangeRates::builtin(),
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// the display currency has no exchange rate.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage_dir = get("DEVO_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let cart_key = get("DEVO_CART_KEY").unwrap_or(defaults.cart_key);
        let storage_quota_bytes = match get("DEVO_STORAGE_QUOTA_BYTES") {
            Some(raw) => parse_var("DEVO_STORAGE_QUOTA_BYTES", &raw)?,
            None => defaults.storage_quota_bytes,
        };
        let currency = match get("DEVO_CURRENCY") {
            Some(raw) => parse_var("DEVO_CURRENCY", &raw)?,
            None => defaults.currency,
        };
        let locale = match get("DEVO_LOCALE") {
            Some(raw) => parse_var("DEVO_LOCALE", &raw)?,
            None => defaults.locale,
        };

        let mut exchange_rates = defaults.exchange_rates;
        if let Some(raw) = get("DEVO_EXCHANGE_RATES") {
            exchange_rates.apply_overrides(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("DEVO_EXCHANGE_RATES".to_string(), e.to_string())
            })?;
        }

        let config = Self {
            storage_dir,
            cart_key,
            storage_quota_bytes,
            currency,
            locale,
            exchange_rates,
            catalog_path: get("DEVO_CATALOG_PATH").map(PathBuf::from),
        };
        config.display_settings()?;
        Ok(config)
    }

    /// Display settings for the configured currency and locale.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingExchangeRate` if the currency has no rate.
    pub fn display_settings(&self) -> Result<DisplaySettings, ConfigError> {
        DisplaySettings::new(self.currency, &self.exchange_rates, self.locale)
            .ok_or(ConfigError::MissingExchangeRate(self.currency))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable value, naming the variable in the error.
fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
