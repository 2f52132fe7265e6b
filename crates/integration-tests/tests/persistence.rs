//! Cart persistence across reloads, corrupt data, and storage quota.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use devo_store_core::ProductId;
use devo_store_integration_tests::{GADGET, TestStore, WIDGET, widget_catalog};
use devo_store_storefront::cart::{CartManager, LoadOutcome};
use devo_store_storefront::catalog::{Product, ProductMetadata, StaticCatalog};
use devo_store_storefront::notify::NoticeLevel;
use devo_store_storefront::storage::{FileStorage, Storage, StorageError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_reload_restores_cart() {
    let store = TestStore::new().unwrap();
    {
        let mut cart = store.open().unwrap();
        cart.add_item(WIDGET).unwrap();
        cart.add_item(GADGET).unwrap();
        cart.set_quantity(WIDGET, 3).unwrap();
    }

    let cart = store.open().unwrap();
    let lines: Vec<(ProductId, u32)> = cart
        .items()
        .iter()
        .map(|i| (i.product_id, i.quantity))
        .collect();
    assert_eq!(lines, vec![(WIDGET, 3), (GADGET, 1)]);
    assert_eq!(cart.total(Decimal::ONE, "$").unwrap().formatted, "$54.50");
}

#[test]
fn test_reload_keeps_price_snapshot() {
    let store = TestStore::new().unwrap();
    store.open().unwrap().add_item(WIDGET).unwrap();

    let repriced = StaticCatalog::new(vec![Product {
        id: WIDGET,
        name: "Widget".to_string(),
        price: dec!(15.00),
        category: "tools".to_string(),
        metadata: ProductMetadata::default(),
    }])
    .unwrap();
    let mut cart = store.open_with(repriced).unwrap();
    assert_eq!(cart.items()[0].unit_price, dec!(10.00));

    cart.add_item(WIDGET).unwrap();
    assert_eq!(cart.items()[0].unit_price, dec!(10.00));
    assert_eq!(cart.total(Decimal::ONE, "$").unwrap().amount, dec!(20.00));
}

#[test]
fn test_legacy_numeric_prices_load() {
    let store = TestStore::new().unwrap();
    store
        .write_stored_cart(
            r#"[{"id":1,"name":"Widget","price":10,"category":"tools","quantity":2,"image":"w.png"}]"#,
        )
        .unwrap();

    let cart = store.open().unwrap();
    assert_eq!(cart.count(), 2);
    assert_eq!(cart.total(Decimal::ONE, "$").unwrap().formatted, "$20.00");
}

#[test]
fn test_corrupt_cart_starts_empty_and_is_replaced_on_save() {
    let corrupt = [
        "{not json",
        r#"{"id":1}"#,
        r#"[{"id":1,"name":"Widget","price":"10.00","category":"tools","quantity":0}]"#,
        r#"[{"id":1,"name":"Widget","price":"-1","category":"tools","quantity":1}]"#,
        r#"[{"id":1,"name":"A","price":"1","category":"t","quantity":1},{"id":1,"name":"A","price":"1","category":"t","quantity":1}]"#,
        r#"[{"id":1,"name":"Widget","price":"79228162514264337593543950335","category":"tools","quantity":2}]"#,
    ];

    for raw in corrupt {
        let store = TestStore::new().unwrap();
        store.write_stored_cart(raw).unwrap();

        let storage = FileStorage::open(store.dir.path()).unwrap();
        let mut cart = CartManager::new(storage, widget_catalog());
        assert!(
            matches!(cart.load(), LoadOutcome::Reset { .. }),
            "expected reset for {raw}"
        );
        assert!(cart.items().is_empty());
        // Corrupt data stays until the next successful save
        assert_eq!(store.stored_cart().as_deref(), Some(raw));

        assert_eq!(cart.total(Decimal::ONE, "$").unwrap().amount, Decimal::ZERO);
        assert!(cart.view().is_empty());

        cart.add_item(GADGET).unwrap();
        let reloaded = store.open().unwrap();
        assert_eq!(reloaded.count(), 1);
    }
}

#[test]
fn test_quota_exceeded_keeps_in_memory_change() {
    let store = TestStore::new().unwrap();
    let storage = FileStorage::with_quota(store.dir.path(), 16).unwrap();
    let notices = std::rc::Rc::clone(&store.notices);
    let mut cart = CartManager::new(storage, widget_catalog()).with_notifier(notices);
    cart.load();

    let update = cart.add_item(WIDGET).unwrap();
    assert!(!update.is_persisted());
    assert!(matches!(
        update.save_error,
        Some(StorageError::QuotaExceeded { .. })
    ));
    assert_eq!(cart.count(), 1);
    assert_eq!(store.stored_cart(), None);

    let levels: Vec<NoticeLevel> = store
        .notices
        .borrow()
        .notices()
        .iter()
        .map(|n| n.level)
        .collect();
    assert_eq!(levels, vec![NoticeLevel::Warning, NoticeLevel::Success]);
}

#[test]
fn test_custom_key_is_isolated() {
    let store = TestStore::new().unwrap();
    let storage = FileStorage::open(store.dir.path()).unwrap();
    let mut cart = CartManager::new(storage, widget_catalog()).with_key("guest_cart");
    cart.load();
    cart.add_item(WIDGET).unwrap();

    assert!(store.dir.path().join("guest_cart.json").exists());
    assert_eq!(store.stored_cart(), None);
    assert_eq!(
        cart.storage().get("guest_cart").unwrap().as_deref(),
        Some(r#"[{"id":1,"name":"Widget","price":"10.00","category":"tools","quantity":1}]"#)
    );
}
