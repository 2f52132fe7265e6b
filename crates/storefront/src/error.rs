//! Cart operation errors.
//!
//! Only validation failures surface as [`CartError`]. Storage failures never
//! abort a mutation: a failed save is reported on the returned
//! [`CartUpdate`](crate::cart::CartUpdate) and a corrupt persisted cart is
//! reset during [`load`](crate::cart::CartManager::load).

use devo_store_core::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product id is not in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A quantity was negative or larger than a line item can hold.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The line's quantity or the cart subtotal would pass its limit.
    #[error("quantity limit reached for product {0}")]
    QuantityLimit(ProductId),

    /// The cart total does not fit in a `Decimal` at the requested rate.
    #[error("cart total overflows at rate {0}")]
    TotalOverflow(Decimal),

    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
