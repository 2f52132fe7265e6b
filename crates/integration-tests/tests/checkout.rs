//! Checkout against a persisted cart.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use devo_store_core::{CurrencyCode, Email, ExchangeRates, Locale};
use devo_store_integration_tests::{GADGET, TestStore, WIDGET};
use devo_store_storefront::cart::CartChange;
use devo_store_storefront::display::DisplaySettings;
use devo_store_storefront::error::CartError;
use devo_store_storefront::notify::NoticeLevel;
use rust_decimal_macros::dec;
use serde_json::Value;

#[test]
fn test_checkout_builds_request_and_clears_storage() {
    let store = TestStore::new().unwrap();
    let mut cart = store.open().unwrap();
    cart.add_item(WIDGET).unwrap();
    cart.add_item(GADGET).unwrap();
    cart.add_item(GADGET).unwrap();

    let email = Email::parse("buyer@example.com").unwrap();
    let outcome = cart.checkout(Some(email)).unwrap();

    assert_eq!(outcome.request.item_count, 3);
    assert_eq!(outcome.request.total.amount, dec!(59.00));
    assert_eq!(outcome.update.change, CartChange::Cleared { lines: 2 });
    assert!(cart.items().is_empty());
    assert_eq!(store.stored_cart().as_deref(), Some("[]"));
    assert!(store.html.borrow().items_html().contains("Your cart is empty"));

    let json: Value = serde_json::from_str(&outcome.request.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["email"], "buyer@example.com");
    assert_eq!(json["lines"].as_array().unwrap().len(), 2);
    assert_eq!(json["lines"][1]["name"], "Gadget");

    let reloaded = store.open().unwrap();
    assert_eq!(reloaded.count(), 0);
}

#[test]
fn test_checkout_in_display_currency() {
    let store = TestStore::new().unwrap();
    let display =
        DisplaySettings::new(CurrencyCode::IDR, &ExchangeRates::builtin(), Locale::Id).unwrap();
    let mut cart = store.open().unwrap().with_display(display);
    cart.add_item(GADGET).unwrap();

    let request = cart.checkout(None).unwrap().request;
    // 24.50 * 15500
    assert_eq!(request.total.amount, dec!(379750));
    assert_eq!(request.total.currency_code, CurrencyCode::IDR);
    assert_eq!(request.base_subtotal.amount, dec!(24.50));
    assert!(request.email.is_none());
}

#[test]
fn test_empty_checkout_is_rejected() {
    let store = TestStore::new().unwrap();
    let mut cart = store.open().unwrap();

    assert_eq!(cart.checkout(None).unwrap_err(), CartError::EmptyCart);
    assert_eq!(store.stored_cart(), None);

    let notices = store.notices.borrow();
    assert_eq!(notices.notices().len(), 1);
    assert_eq!(notices.notices()[0].level, NoticeLevel::Warning);
}
