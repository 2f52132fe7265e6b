//! Devo Store storefront library.
//!
//! Client-side storefront state: the product catalog, the shopping cart
//! manager, cart persistence, and the renderers that keep cart views in
//! sync after every change.
//!
//! # Modules
//!
//! - [`cart`] - Cart model, display projection, and [`CartManager`]
//! - [`catalog`] - Product catalog lookup, filtering, and sorting
//! - [`storage`] - Key/value persistence with a byte quota
//! - [`render`] - Text and HTML cart renderers
//! - [`notify`] - User-facing notices
//! - [`checkout`] - Checkout request payloads
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod display;
pub mod error;
pub mod i18n;
pub mod notify;
pub mod render;
pub mod storage;

pub use cart::CartManager;
pub use error::{CartError, Result};
