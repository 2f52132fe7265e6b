//! Devo Store Core - Shared types library.
//!
//! This crate provides common types used across all Devo Store components:
//! - `storefront` - Catalog, cart state manager, storage, and rendering
//! - `cli` - Command-line driver for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and locales

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
