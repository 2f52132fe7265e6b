//! Display projection of a cart.
//!
//! A [`CartView`] is what renderers receive: formatted, localized, and
//! detached from the live cart.

use devo_store_core::{CurrencyCode, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;

use super::Cart;
use super::model::LineItem;
use crate::display::DisplaySettings;

/// Line item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub quantity: u32,
    /// Quantity the decrease control sets; zero removes the line.
    pub decrement_quantity: u32,
    /// Quantity the increase control sets. Equals `quantity` at `u32::MAX`.
    pub increment_quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Static labels the renderers need, in the display locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLabels {
    pub title: &'static str,
    pub empty_title: &'static str,
    pub empty_hint: &'static str,
    pub items: &'static str,
    pub total: &'static str,
    pub remove: &'static str,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    /// Total in the display currency, unrounded.
    pub total_amount: Decimal,
    pub currency: CurrencyCode,
    pub subtotal: String,
    pub labels: CartLabels,
}

impl CartView {
    /// Project `cart` through `display`.
    #[must_use]
    pub fn build(cart: &Cart, display: &DisplaySettings) -> Self {
        let messages = display.messages();
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::build(item, display))
                .collect(),
            item_count: cart.count(),
            total_amount: display.convert(cart.subtotal()).amount,
            currency: display.currency,
            subtotal: display.format(cart.subtotal()),
            labels: CartLabels {
                title: messages.cart_title,
                empty_title: messages.empty_title,
                empty_hint: messages.empty_hint,
                items: messages.items_label,
                total: messages.total_label,
                remove: messages.remove_label,
            },
        }
    }

    /// View of an empty cart.
    #[must_use]
    pub fn empty(display: &DisplaySettings) -> Self {
        Self::build(&Cart::new(), display)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn build(item: &LineItem, display: &DisplaySettings) -> Self {
        Self {
            id: item.product_id,
            title: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            decrement_quantity: item.quantity.saturating_sub(1),
            increment_quantity: item.quantity.saturating_add(1),
            price: display.format(item.unit_price),
            line_price: display.format(item.line_total()),
        }
    }
}
