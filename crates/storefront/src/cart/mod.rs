//! Cart state manager.
//!
//! [`CartManager`] is the single owner of the shopping cart for a session.
//! Every mutation runs the same pipeline before returning:
//!
//! 1. update the in-memory [`Cart`]
//! 2. persist it to [`Storage`]
//! 3. rebuild the [`CartView`] and hand it to every [`CartRenderer`]
//! 4. emit a [`Notice`]
//!
//! Mutations take `&mut self`, so nothing can observe a cart that has been
//! changed but not yet saved and rendered.
//!
//! Persistence is best-effort. A failed save is logged, reported through the
//! notifier and returned on [`CartUpdate::save_error`], but the in-memory
//! change stands. A persisted cart that cannot be parsed is discarded on
//! [`CartManager::load`] and the session starts empty.
//!
//! # Example
//!
//! ```rust
//! use devo_store_core::ProductId;
//! use devo_store_storefront::cart::CartManager;
//! use devo_store_storefront::catalog::StaticCatalog;
//! use devo_store_storefront::storage::MemoryStorage;
//!
//! let mut cart = CartManager::new(MemoryStorage::new(), StaticCatalog::builtin());
//! cart.load();
//!
//! cart.add_item(ProductId::new(1)).unwrap();
//! cart.add_item(ProductId::new(1)).unwrap();
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total(rust_decimal::Decimal::ONE, "$").unwrap().formatted, "$199.98");
//! ```

mod model;
mod view;

pub use model::{Cart, InvalidCart, LineItem};
pub use view::{CartItemView, CartLabels, CartView};

use std::num::NonZeroU32;

use devo_store_core::{Email, ProductId, format_amount};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::checkout::CheckoutRequest;
use crate::display::DisplaySettings;
use crate::error::{CartError, Result};
use crate::notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
use crate::render::CartRenderer;
use crate::storage::{Storage, StorageError};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added { product_id: ProductId },
    /// An existing line's quantity went up by one.
    Incremented { product_id: ProductId, quantity: u32 },
    /// A line's quantity was set explicitly.
    QuantitySet {
        product_id: ProductId,
        previous: u32,
        quantity: u32,
    },
    /// A line was removed.
    Removed { product_id: ProductId, quantity: u32 },
    /// Every line was removed.
    Cleared { lines: usize },
    /// Nothing changed; nothing was saved or rendered.
    Unchanged,
}

/// Result of a cart mutation.
#[derive(Debug)]
pub struct CartUpdate {
    pub change: CartChange,
    /// Set when the cart changed in memory but could not be persisted.
    pub save_error: Option<StorageError>,
}

impl CartUpdate {
    const fn unchanged() -> Self {
        Self {
            change: CartChange::Unchanged,
            save_error: None,
        }
    }

    /// True unless a save was attempted and failed.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// How [`CartManager::load`] initialised the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored; the cart starts empty.
    Empty,
    /// The stored cart was restored.
    Restored { lines: usize },
    /// The stored cart could not be read or parsed and was discarded.
    Reset { reason: String },
}

/// Numeric and formatted cart total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotal {
    pub amount: Decimal,
    pub formatted: String,
}

/// Result of a successful checkout.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub request: CheckoutRequest,
    /// The update that cleared the cart.
    pub update: CartUpdate,
}

/// Owns the cart for one session and keeps storage and views in sync.
pub struct CartManager<S, C> {
    cart: Cart,
    storage: S,
    catalog: C,
    key: String,
    display: DisplaySettings,
    renderers: Vec<Box<dyn CartRenderer>>,
    notifier: Box<dyn Notifier>,
}

impl<S, C> std::fmt::Debug for CartManager<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("key", &self.key)
            .field("display", &self.display)
            .field("renderers", &self.renderers.len())
            .finish_non_exhaustive()
    }
}

impl<S: Storage, C: Catalog> CartManager<S, C> {
    /// Create a manager with an empty cart, the default storage key, base
    /// currency display, no renderers, and a [`TracingNotifier`].
    ///
    /// Call [`load`](Self::load) to rehydrate a persisted cart.
    pub fn new(storage: S, catalog: C) -> Self {
        Self {
            cart: Cart::new(),
            storage,
            catalog,
            key: DEFAULT_CART_KEY.to_string(),
            display: DisplaySettings::default(),
            renderers: Vec::new(),
            notifier: Box::new(TracingNotifier),
        }
    }

    /// Use a different storage key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Use different display settings.
    #[must_use]
    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }

    /// Register a renderer. Renderers are called in registration order.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl CartRenderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Replace the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable storage access, for sharing the backend with other state.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub const fn display(&self) -> &DisplaySettings {
        &self.display
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current display projection.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::build(&self.cart, &self.display)
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Sum of quantities. Zero for an empty cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Cart total converted with `rate` and formatted with `symbol` to two
    /// decimal places. Zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the converted total does not
    /// fit in a `Decimal`.
    pub fn total(&self, rate: Decimal, symbol: &str) -> Result<CartTotal> {
        let amount = self
            .cart
            .total(rate)
            .ok_or(CartError::TotalOverflow(rate))?;
        Ok(CartTotal {
            amount,
            formatted: format_amount(amount, symbol, 2),
        })
    }

    /// Cart total in the configured display currency.
    #[must_use]
    pub fn display_total(&self) -> CartTotal {
        let money = self.display.convert(self.cart.subtotal());
        CartTotal {
            amount: money.amount,
            formatted: money.to_string(),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Rehydrate the cart from storage and render it.
    ///
    /// Never fails: unreadable or invalid persisted data is logged and the
    /// cart starts empty. The stored value is left in place until the next
    /// successful save overwrites it.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.storage.get(&self.key) {
            Ok(None) => {
                self.cart = Cart::new();
                LoadOutcome::Empty
            }
            Ok(Some(raw)) => match Cart::from_json(&raw) {
                Ok(cart) => {
                    let lines = cart.items().len();
                    self.cart = cart;
                    tracing::debug!(lines, "Restored persisted cart");
                    LoadOutcome::Restored { lines }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding corrupt persisted cart");
                    self.cart = Cart::new();
                    LoadOutcome::Reset {
                        reason: e.to_string(),
                    }
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted cart");
                self.cart = Cart::new();
                LoadOutcome::Reset {
                    reason: e.to_string(),
                }
            }
        };
        self.render();
        outcome
    }

    /// Write the cart to storage.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the in-memory cart is unaffected.
    pub fn save(&mut self) -> std::result::Result<(), StorageError> {
        let json = self.cart.to_json().map_err(|e| StorageError::Io(e.into()))?;
        self.storage.set(&self.key, &json)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// - [`CartError::ProductNotFound`] if the id is not in the catalog
    /// - [`CartError::QuantityLimit`] if the line is already at `u32::MAX` or
    ///   the subtotal would pass [`MAX_AMOUNT`](devo_store_core::MAX_AMOUNT)
    ///
    /// The cart is unchanged in both cases.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, product_id: ProductId) -> Result<CartUpdate> {
        let Some(product) = self.catalog.find_by_id(product_id) else {
            tracing::info!("Product not in catalog");
            let messages = self.display.messages();
            self.notifier.notify(&Notice::new(
                NoticeLevel::Error,
                messages.not_found_title,
                messages.not_found_body(product_id),
            ));
            return Err(CartError::ProductNotFound(product_id));
        };

        let name = product.name.clone();
        let Some(quantity) = self.cart.add(product) else {
            tracing::info!("Quantity limit reached");
            self.notify_quantity_rejected();
            return Err(CartError::QuantityLimit(product_id));
        };

        let change = if quantity == 1 {
            CartChange::Added { product_id }
        } else {
            CartChange::Incremented {
                product_id,
                quantity,
            }
        };

        let update = self.commit(change);
        let messages = self.display.messages();
        self.notifier.notify(&Notice::new(
            NoticeLevel::Success,
            messages.added_title,
            messages.added_body(&name),
        ));
        Ok(update)
    }

    /// Remove a product's line. Removing an absent product changes nothing.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> CartUpdate {
        let Some(removed) = self.cart.remove(product_id) else {
            return CartUpdate::unchanged();
        };

        let update = self.commit(CartChange::Removed {
            product_id,
            quantity: removed.quantity,
        });
        let messages = self.display.messages();
        self.notifier.notify(&Notice::new(
            NoticeLevel::Warning,
            messages.removed_title,
            messages.removed_body,
        ));
        update
    }

    /// Set a line's quantity.
    ///
    /// Zero removes the line. Setting the quantity of a product that is not
    /// in the cart changes nothing.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] for negative quantities and quantities
    ///   above `u32::MAX`
    /// - [`CartError::QuantityLimit`] if the subtotal would pass
    ///   [`MAX_AMOUNT`](devo_store_core::MAX_AMOUNT)
    ///
    /// The cart is unchanged in both cases.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<CartUpdate> {
        let Ok(quantity_u32) = u32::try_from(quantity) else {
            tracing::info!("Rejected quantity");
            self.notify_quantity_rejected();
            return Err(CartError::InvalidQuantity(quantity));
        };

        let Some(new_quantity) = NonZeroU32::new(quantity_u32) else {
            return Ok(self.remove_item(product_id));
        };

        let previous = match self.cart.set_quantity(product_id, new_quantity) {
            Ok(Some(previous)) => previous,
            Ok(None) => return Ok(CartUpdate::unchanged()),
            Err(e) => {
                tracing::info!(error = %e, "Rejected quantity");
                self.notify_quantity_rejected();
                return Err(CartError::QuantityLimit(product_id));
            }
        };

        Ok(self.commit(CartChange::QuantitySet {
            product_id,
            previous,
            quantity: new_quantity.get(),
        }))
    }

    /// Empty the cart. Always persists, even if it was already empty.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartUpdate {
        let lines = self.cart.clear();
        self.commit(CartChange::Cleared { lines })
    }

    /// Build a checkout request and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to check out; the
    /// cart is unchanged.
    #[instrument(skip(self, email))]
    pub fn checkout(&mut self, email: Option<Email>) -> Result<CheckoutOutcome> {
        let messages = self.display.messages();
        if self.cart.is_empty() {
            self.notifier.notify(&Notice::new(
                NoticeLevel::Warning,
                messages.empty_checkout_title,
                messages.empty_checkout_body,
            ));
            return Err(CartError::EmptyCart);
        }

        let request = CheckoutRequest::build(&self.cart, &self.display, email);
        tracing::info!(
            checkout_id = %request.id,
            items = request.item_count,
            total = %request.total,
            "Checkout request built"
        );
        self.notifier.notify(&Notice::new(
            NoticeLevel::Success,
            messages.checkout_title,
            messages.checkout_body,
        ));
        let update = self.clear();
        Ok(CheckoutOutcome { request, update })
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    fn notify_quantity_rejected(&mut self) {
        let messages = self.display.messages();
        self.notifier.notify(&Notice::new(
            NoticeLevel::Error,
            messages.invalid_quantity_title,
            messages.invalid_quantity_body,
        ));
    }

    /// Persist and re-render after an in-memory change.
    fn commit(&mut self, change: CartChange) -> CartUpdate {
        let save_error = self.save().err();
        if let Some(e) = &save_error {
            tracing::warn!(error = %e, ?change, "Cart changed but could not be saved");
            let messages = self.display.messages();
            self.notifier.notify(&Notice::new(
                NoticeLevel::Warning,
                messages.save_failed_title,
                messages.save_failed_body,
            ));
        }
        self.render();
        tracing::debug!(?change, count = self.cart.count(), "Cart updated");
        CartUpdate { change, save_error }
    }

    fn render(&mut self) {
        if self.renderers.is_empty() {
            return;
        }
        let view = self.view();
        for renderer in &mut self.renderers {
            renderer.render(&view);
        }
    }
}
