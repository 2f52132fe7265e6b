//! Integration tests for Devo Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p devo-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart manager behaviour
//! - `persistence` - File storage round-trips, corruption, and quota
//! - `checkout` - Checkout payloads and cart clearing
//!
//! This library holds the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::cell::RefCell;
use std::rc::Rc;

use devo_store_core::ProductId;
use devo_store_storefront::CartManager;
use devo_store_storefront::catalog::{Product, ProductMetadata, StaticCatalog};
use devo_store_storefront::notify::NoticeLog;
use devo_store_storefront::render::HtmlRenderer;
use devo_store_storefront::storage::{FileStorage, StorageError};
use rust_decimal_macros::dec;
use tempfile::TempDir;

pub const WIDGET: ProductId = ProductId::new(1);
pub const GADGET: ProductId = ProductId::new(2);

/// Two-product catalog: Widget at 10.00 and Gadget at 24.50.
#[must_use]
pub fn widget_catalog() -> StaticCatalog {
    let product = |id, name: &str, price| Product {
        id,
        name: name.to_string(),
        price,
        category: "tools".to_string(),
        metadata: ProductMetadata::default(),
    };
    match StaticCatalog::new(vec![
        product(WIDGET, "Widget", dec!(10.00)),
        product(GADGET, "Gadget", dec!(24.50)),
    ]) {
        Ok(catalog) => catalog,
        Err(e) => panic!("fixture catalog is invalid: {e}"),
    }
}

/// A cart manager over file storage in a temporary directory, with handles
/// on its HTML renderer and notice log.
pub struct TestStore {
    pub dir: TempDir,
    pub html: Rc<RefCell<HtmlRenderer>>,
    pub notices: Rc<RefCell<NoticeLog>>,
}

impl TestStore {
    /// Create an empty store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            html: Rc::new(RefCell::new(HtmlRenderer::new())),
            notices: Rc::new(RefCell::new(NoticeLog::new())),
        })
    }

    /// Open a manager on this store's directory and load the persisted cart.
    ///
    /// Managers opened from the same store share files, so opening a second
    /// one simulates a page reload.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened.
    pub fn open(&self) -> Result<CartManager<FileStorage, StaticCatalog>, StorageError> {
        self.open_with(widget_catalog())
    }

    /// Like [`TestStore::open`] with a custom catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened.
    pub fn open_with(
        &self,
        catalog: StaticCatalog,
    ) -> Result<CartManager<FileStorage, StaticCatalog>, StorageError> {
        let storage = FileStorage::open(self.dir.path())?;
        let mut manager = CartManager::new(storage, catalog)
            .with_renderer(Rc::clone(&self.html))
            .with_notifier(Rc::clone(&self.notices));
        manager.load();
        Ok(manager)
    }

    /// Raw persisted cart JSON, if any.
    #[must_use]
    pub fn stored_cart(&self) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("cart.json")).ok()
    }

    /// Overwrite the persisted cart with raw text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_stored_cart(&self, contents: &str) -> std::io::Result<()> {
        std::fs::write(self.dir.path().join("cart.json"), contents)
    }
}
