//! Checkout request payload.
//!
//! The storefront has no payment integration. Checkout produces the request
//! body a payment gateway would receive and hands it back to the caller.

use chrono::{DateTime, Utc};
use devo_store_core::{CurrencyCode, Email, Money, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::display::DisplaySettings;

/// One purchased line in display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Stub payment request built from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub currency: CurrencyCode,
    /// Rate applied to base-currency prices.
    pub exchange_rate: Decimal,
    pub lines: Vec<CheckoutLine>,
    pub item_count: u64,
    /// Subtotal in the base currency.
    pub base_subtotal: Money,
    /// Total in the display currency, rounded to its minor unit.
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

impl CheckoutRequest {
    /// Build a payload for `cart`.
    #[must_use]
    pub fn build(cart: &Cart, display: &DisplaySettings, email: Option<Email>) -> Self {
        let round = |base: Decimal| {
            let converted = display.convert(base);
            Money::new(converted.rounded(), converted.currency_code)
        };
        let lines = cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                product_id: item.product_id,
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: round(item.unit_price),
                line_total: round(item.line_total()),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            currency: display.currency,
            exchange_rate: display.rate,
            lines,
            item_count: cart.count(),
            base_subtotal: Money::new(cart.subtotal(), CurrencyCode::BASE),
            total: round(cart.subtotal()),
            email,
        }
    }

    /// Pretty JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
