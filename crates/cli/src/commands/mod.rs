//! Command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;

use devo_store_core::{CurrencyCode, Locale};
use devo_store_storefront::CartManager;
use devo_store_storefront::catalog::{CatalogError, StaticCatalog};
use devo_store_storefront::config::{ConfigError, StoreConfig};
use devo_store_storefront::display::DisplaySettings;
use devo_store_storefront::storage::{FileStorage, StorageError};
use thiserror::Error;

/// Errors that can occur while preparing a command.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to open storage: {0}")]
    Storage(#[from] StorageError),
}

/// Resolved configuration shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: StoreConfig,
    pub display: DisplaySettings,
}

impl Context {
    /// Load configuration from the environment and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the chosen currency
    /// has no exchange rate.
    pub fn from_env(
        currency: Option<CurrencyCode>,
        locale: Option<Locale>,
    ) -> Result<Self, SetupError> {
        Self::new(StoreConfig::from_env()?, currency, locale)
    }

    /// Apply flag overrides to an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen currency has no exchange rate.
    pub fn new(
        mut config: StoreConfig,
        currency: Option<CurrencyCode>,
        locale: Option<Locale>,
    ) -> Result<Self, SetupError> {
        if let Some(currency) = currency {
            config.currency = currency;
        }
        if let Some(locale) = locale {
            config.locale = locale;
        }
        let display = config.display_settings()?;
        Ok(Self { config, display })
    }

    /// Configured catalog file, or the built-in catalog.
    pub fn catalog(&self) -> Result<StaticCatalog, SetupError> {
        match &self.config.catalog_path {
            Some(path) => Ok(StaticCatalog::from_path(path)?),
            None => Ok(StaticCatalog::builtin()),
        }
    }

    /// Cart manager over file storage, with the persisted cart loaded.
    pub fn cart_manager(&self) -> Result<CartManager<FileStorage, StaticCatalog>, SetupError> {
        let storage =
            FileStorage::with_quota(&self.config.storage_dir, self.config.storage_quota_bytes)?;
        let mut manager = CartManager::new(storage, self.catalog()?)
            .with_key(self.config.cart_key.clone())
            .with_display(self.display.clone());
        manager.load();
        Ok(manager)
    }
}
