//! Core types for Devo Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod locale;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use locale::{Locale, UnknownLocale};
pub use price::{
    CurrencyCode, CurrencyError, ExchangeRates, MAX_AMOUNT, MAX_EXCHANGE_RATE, Money, format_amount,
};
