//! Cart data model.
//!
//! [`Cart`] is a plain value: an insertion-ordered list of [`LineItem`]s with
//! unique product ids. It knows nothing about storage or rendering; the
//! [`CartManager`](super::CartManager) wraps it with those side effects.

use std::num::NonZeroU32;

use devo_store_core::{MAX_AMOUNT, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;

/// A product snapshot plus the quantity in the cart.
///
/// Display fields are copied from the catalog when the line is created, so
/// later catalog changes never alter the price a shopper already sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    pub category: String,
    pub quantity: u32,
}

impl LineItem {
    /// Snapshot `product` with quantity 1.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// Unit price times quantity, in the base currency.
    ///
    /// Saturates at `Decimal::MAX`. Lines held by a [`Cart`] stay within
    /// [`MAX_AMOUNT`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Reasons a cart is rejected on load or a quantity change is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCart {
    #[error("product {0} appears in more than one line item")]
    DuplicateProduct(ProductId),
    #[error("product {0} has quantity zero")]
    ZeroQuantity(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("product {0} pushes the cart subtotal past the amount limit")]
    AmountLimit(ProductId),
}

/// Ordered line items with unique product ids.
///
/// Serializes as a bare JSON array of line items. Deserialization re-checks
/// the uniqueness and positive-quantity invariants, and that the subtotal
/// stays within [`MAX_AMOUNT`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        let mut subtotal = Decimal::ZERO;
        for item in &items {
            if item.quantity == 0 {
                return Err(InvalidCart::ZeroQuantity(item.product_id));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(InvalidCart::NegativePrice(item.product_id));
            }
            if !seen.insert(item.product_id) {
                return Err(InvalidCart::DuplicateProduct(item.product_id));
            }
            subtotal = item
                .checked_line_total()
                .and_then(|line| subtotal.checked_add(line))
                .filter(|sum| *sum <= MAX_AMOUNT)
                .ok_or(InvalidCart::AmountLimit(item.product_id))?;
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
    }

    /// Subtotal with the line for `product_id` priced at `unit_price` times
    /// `quantity`, or `None` if that passes [`MAX_AMOUNT`].
    fn subtotal_with(
        &self,
        product_id: ProductId,
        unit_price: Decimal,
        quantity: u32,
    ) -> Option<Decimal> {
        let others = self
            .items
            .iter()
            .filter(|item| item.product_id != product_id)
            .map(LineItem::line_total)
            .try_fold(Decimal::ZERO, Decimal::checked_add)?;
        unit_price
            .checked_mul(Decimal::from(quantity))
            .and_then(|line| others.checked_add(line))
            .filter(|sum| *sum <= MAX_AMOUNT)
    }

    /// Add one unit of `product`, returning the new quantity.
    ///
    /// Returns `None` if the quantity is already at `u32::MAX` or the
    /// subtotal would pass [`MAX_AMOUNT`]; the cart is left unchanged in that
    /// case.
    pub fn add(&mut self, product: &Product) -> Option<u32> {
        let Some(current) = self.get(product.id).map(|item| item.quantity) else {
            self.subtotal_with(product.id, product.price, 1)?;
            self.items.push(LineItem::snapshot(product));
            return Some(1);
        };
        let next = NonZeroU32::new(current)?.checked_add(1)?;
        self.set_quantity(product.id, next).ok()?;
        Some(next.get())
    }

    /// Remove the line for `product_id`, returning it if it was present.
    pub fn remove(&mut self, product_id: ProductId) -> Option<LineItem> {
        self.position(product_id).map(|i| self.items.remove(i))
    }

    /// Set the quantity of an existing line. Returns the previous quantity,
    /// or `None` if the product is not in the cart.
    ///
    /// Zero is not accepted here; callers route zero to [`Cart::remove`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCart::AmountLimit`] if the subtotal would pass
    /// [`MAX_AMOUNT`]; the cart is left unchanged.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<Option<u32>, InvalidCart> {
        let Some(unit_price) = self.get(product_id).map(|item| item.unit_price) else {
            return Ok(None);
        };
        if self.subtotal_with(product_id, unit_price, quantity.get()).is_none() {
            return Err(InvalidCart::AmountLimit(product_id));
        }
        Ok(self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .map(|item| std::mem::replace(&mut item.quantity, quantity.get())))
    }

    /// Remove every line, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let lines = self.items.len();
        self.items.clear();
        lines
    }

    /// Sum of quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals in the base currency. Never exceeds [`MAX_AMOUNT`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Subtotal converted with `rate`, or `None` if the product overflows.
    #[must_use]
    pub fn total(&self, rate: Decimal) -> Option<Decimal> {
        self.subtotal().checked_mul(rate)
    }

    /// Serialize to the persisted JSON layout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the persisted JSON layout, re-checking cart invariants.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or a cart that violates the
    /// unique-id, positive-quantity or subtotal invariants.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::ProductMetadata;

    fn widget() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            price: dec!(10.00),
            category: "tools".to_string(),
            metadata: ProductMetadata::default(),
        }
    }

    fn gadget() -> Product {
        Product {
            id: ProductId::new(2),
            name: "Gadget".to_string(),
            price: dec!(2.50),
            category: "tools".to_string(),
            metadata: ProductMetadata::default(),
        }
    }

    #[test]
    fn test_add_twice_keeps_one_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&widget()), Some(1));
        assert_eq!(cart.add(&widget()), Some(2));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&gadget());
        cart.add(&widget());
        cart.add(&gadget());
        let ids: Vec<i32> = cart.items().iter().map(|i| i.product_id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_add_saturates_without_change() {
        let mut cart = Cart::try_from(vec![LineItem {
            quantity: u32::MAX,
            ..LineItem::snapshot(&widget())
        }])
        .unwrap();
        assert_eq!(cart.add(&widget()), None);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_snapshot_is_independent_of_product() {
        let mut product = widget();
        let mut cart = Cart::new();
        cart.add(&product);
        product.price = dec!(99.00);
        product.name = "Renamed".to_string();

        assert_eq!(cart.items()[0].unit_price, dec!(10.00));
        assert_eq!(cart.items()[0].name, "Widget");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&widget());
        let before = cart.clone();
        assert!(cart.remove(ProductId::new(42)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(&widget());
        assert_eq!(
            cart.set_quantity(ProductId::new(1), NonZeroU32::new(5).unwrap()),
            Ok(Some(1))
        );
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);
        assert_eq!(
            cart.set_quantity(ProductId::new(9), NonZeroU32::new(5).unwrap()),
            Ok(None)
        );
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(dec!(0.92)), Some(Decimal::ZERO));

        cart.add(&widget());
        cart.add(&widget());
        cart.add(&gadget());
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.subtotal(), dec!(22.50));
        assert_eq!(cart.total(dec!(2)), Some(dec!(45.00)));
        assert_eq!(cart.total(Decimal::MAX), None);
    }

    fn priced(price: Decimal) -> Product {
        Product {
            price,
            ..widget()
        }
    }

    #[test]
    fn test_set_quantity_past_amount_limit_is_refused() {
        let mut cart = Cart::new();
        cart.add(&priced(dec!(50000000000000000000)));
        cart.add(&gadget());
        let before = cart.clone();

        assert_eq!(
            cart.set_quantity(ProductId::new(1), NonZeroU32::MAX),
            Err(InvalidCart::AmountLimit(ProductId::new(1)))
        );
        assert_eq!(cart, before);
        assert_eq!(
            cart.set_quantity(ProductId::new(1), NonZeroU32::new(2).unwrap()),
            Err(InvalidCart::AmountLimit(ProductId::new(1)))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_past_amount_limit_is_refused() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&priced(dec!(60000000000000000000))), Some(1));
        assert_eq!(cart.add(&priced(dec!(60000000000000000000))), None);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.subtotal(), dec!(60000000000000000000));
    }

    #[test]
    fn test_new_line_past_amount_limit_is_refused() {
        let mut cart = Cart::new();
        cart.add(&priced(dec!(60000000000000000000)));
        let pricey_gadget = Product {
            price: dec!(50000000000000000000),
            ..gadget()
        };
        assert_eq!(cart.add(&pricey_gadget), None);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_from_json_rejects_overflowing_amounts() {
        let huge_price = r#"[{"id":1,"name":"A","price":"79228162514264337593543950335","category":"c","quantity":2}]"#;
        let err = serde_json::from_str::<Cart>(huge_price).unwrap_err();
        assert!(err.to_string().contains("subtotal"), "{err}");

        let over_limit = r#"[
            {"id":1,"name":"A","price":"60000000000000000000","category":"c","quantity":1},
            {"id":2,"name":"B","price":"60000000000000000000","category":"c","quantity":1}
        ]"#;
        assert!(Cart::from_json(over_limit).is_err());

        let at_limit = r#"[{"id":1,"name":"A","price":"50000000000000000000","category":"c","quantity":2}]"#;
        let cart = Cart::from_json(at_limit).unwrap();
        assert_eq!(cart.subtotal(), MAX_AMOUNT);
    }

    #[test]
    fn test_json_layout() {
        let mut cart = Cart::new();
        cart.add(&widget());
        assert_eq!(
            cart.to_json().unwrap(),
            r#"[{"id":1,"name":"Widget","price":"10.00","category":"tools","quantity":1}]"#
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut cart = Cart::new();
        cart.add(&widget());
        cart.add(&gadget());
        let seven = NonZeroU32::new(7).unwrap();
        cart.set_quantity(ProductId::new(2), seven).unwrap();

        let json = cart.to_json().unwrap();
        let restored = Cart::from_json(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.to_json().unwrap(), json);
    }

    #[test]
    fn test_from_json_rejects_broken_invariants() {
        let duplicate = r#"[
            {"id":1,"name":"A","price":"1","category":"c","quantity":1},
            {"id":1,"name":"A","price":"1","category":"c","quantity":2}
        ]"#;
        assert!(Cart::from_json(duplicate).is_err());

        let zero = r#"[{"id":1,"name":"A","price":"1","category":"c","quantity":0}]"#;
        assert!(Cart::from_json(zero).is_err());

        let negative = r#"[{"id":1,"name":"A","price":"1","category":"c","quantity":-3}]"#;
        assert!(Cart::from_json(negative).is_err());

        let fractional = r#"[{"id":1,"name":"A","price":"1","category":"c","quantity":1.5}]"#;
        assert!(Cart::from_json(fractional).is_err());
    }

    #[test]
    fn test_from_json_accepts_legacy_product_fields() {
        let legacy = r#"[{"id":3,"name":"Game Engine Pro","description":"x",
            "price":199.99,"category":"games","image":"<svg/>","rating":4.7,
            "reviews":67,"quantity":2}]"#;
        let cart = Cart::from_json(legacy).unwrap();
        assert_eq!(cart.items()[0].unit_price, dec!(199.99));
        assert_eq!(cart.count(), 2);
    }
}
