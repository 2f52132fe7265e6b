//! Type-safe money representation using decimal arithmetic.
//!
//! Catalog prices are stored in the base currency ([`CurrencyCode::BASE`]).
//! Display amounts are produced by multiplying with a rate from
//! [`ExchangeRates`] and formatting with [`Money`].

use core::fmt;
use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing currencies or exchange rates.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The currency code is not supported.
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
    /// The rate could not be parsed as a decimal.
    #[error("invalid exchange rate for {currency}: {value}")]
    InvalidRate {
        /// Currency the rate was given for.
        currency: String,
        /// The raw value.
        value: String,
    },
    /// Rates must be strictly positive.
    #[error("exchange rate for {0} must be positive")]
    NonPositiveRate(CurrencyCode),
    /// The base currency always converts at 1.
    #[error("exchange rate for base currency {0} cannot be changed")]
    BaseRateFixed(CurrencyCode),
    /// Rates above [`MAX_EXCHANGE_RATE`] are refused.
    #[error("exchange rate for {0} is too large")]
    RateTooLarge(CurrencyCode),
    /// An override entry was not in `CODE=RATE` form.
    #[error("malformed exchange rate entry: {0}")]
    MalformedEntry(String),
}

/// Largest base-currency amount a product price or cart subtotal may reach.
///
/// Any amount up to this bound converts at any rate up to
/// [`MAX_EXCHANGE_RATE`] without leaving `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x6310_0000, 0x6BC7_5E2D, 5, false, 0);

/// Largest accepted conversion rate from the base currency.
pub const MAX_EXCHANGE_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// ISO 4217 currency codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    IDR,
}

impl CurrencyCode {
    /// Currency that catalog prices are denominated in.
    pub const BASE: Self = Self::USD;

    /// All supported currencies.
    pub const ALL: [Self; 6] = [
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::CAD,
        Self::AUD,
        Self::IDR,
    ];

    /// Display symbol (e.g. `$`, `€`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::IDR => "Rp",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::IDR => "IDR",
        }
    }

    /// Number of minor-unit digits shown when formatting.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::IDR => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CurrencyError::UnknownCurrency(wanted.to_owned()))
    }
}

/// Round and format an amount with an arbitrary symbol.
///
/// ```
/// use devo_store_core::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(1999, 2), "$", 2), "$19.99");
/// assert_eq!(format_amount(Decimal::new(5, 1), "€", 2), "€0.50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let width = decimal_places as usize;
    format!("{symbol}{rounded:.width$}")
}

/// An amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Amount rounded to the currency's display precision.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount.round_dp_with_strategy(
            self.currency_code.decimal_places(),
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(
            self.amount,
            self.currency_code.symbol(),
            self.currency_code.decimal_places(),
        ))
    }
}

/// Conversion rates from the base currency to each display currency.
///
/// The base currency is always present with a rate of exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates {
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExchangeRates {
    /// Rates table containing only the base currency.
    #[must_use]
    pub fn base_only() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(CurrencyCode::BASE, Decimal::ONE);
        Self { rates }
    }

    /// Reference rates shipped with the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::base_only();
        table.rates.insert(CurrencyCode::EUR, Decimal::new(92, 2));
        table.rates.insert(CurrencyCode::GBP, Decimal::new(79, 2));
        table.rates.insert(CurrencyCode::CAD, Decimal::new(136, 2));
        table.rates.insert(CurrencyCode::AUD, Decimal::new(152, 2));
        table.rates.insert(CurrencyCode::IDR, Decimal::new(15_500, 0));
        table
    }

    /// Rate for `currency`, if known.
    #[must_use]
    pub fn rate(&self, currency: CurrencyCode) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    /// Set the rate for a non-base currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is not positive, exceeds
    /// [`MAX_EXCHANGE_RATE`], or `currency` is the base.
    pub fn set_rate(&mut self, currency: CurrencyCode, rate: Decimal) -> Result<(), CurrencyError> {
        if currency == CurrencyCode::BASE {
            if rate == Decimal::ONE {
                return Ok(());
            }
            return Err(CurrencyError::BaseRateFixed(currency));
        }
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(currency));
        }
        if rate > MAX_EXCHANGE_RATE {
            return Err(CurrencyError::RateTooLarge(currency));
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Apply overrides in `EUR=0.92,GBP=0.79` form.
    ///
    /// # Errors
    ///
    /// Returns an error on the first malformed entry; earlier entries stay applied.
    pub fn apply_overrides(&mut self, overrides: &str) -> Result<(), CurrencyError> {
        for entry in overrides.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, value) = entry
                .split_once('=')
                .ok_or_else(|| CurrencyError::MalformedEntry(entry.to_owned()))?;
            let currency: CurrencyCode = code.parse()?;
            let rate: Decimal = value.trim().parse().map_err(|_| CurrencyError::InvalidRate {
                currency: currency.code().to_owned(),
                value: value.trim().to_owned(),
            })?;
            self.set_rate(currency, rate)?;
        }
        Ok(())
    }

    /// Convert a base-currency amount into `currency`.
    ///
    /// Returns `None` if there is no rate for `currency` or the converted
    /// amount does not fit in a `Decimal`.
    #[must_use]
    pub fn convert(&self, amount: Decimal, currency: CurrencyCode) -> Option<Money> {
        self.rate(currency)
            .and_then(|rate| amount.checked_mul(rate))
            .map(|converted| Money::new(converted, currency))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_money_display_rounds_to_cents() {
        assert_eq!(Money::new(dec!(10), CurrencyCode::USD).to_string(), "$10.00");
        assert_eq!(Money::new(dec!(9.995), CurrencyCode::GBP).to_string(), "£10.00");
        assert_eq!(Money::zero(CurrencyCode::EUR).to_string(), "€0.00");
    }

    #[test]
    fn test_money_display_whole_units_for_idr() {
        assert_eq!(
            Money::new(dec!(1549845.5), CurrencyCode::IDR).to_string(),
            "Rp1549846"
        );
    }

    #[test]
    fn test_currency_code_parse_case_insensitive() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert_eq!(" GBP ".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert!(matches!(
            "XYZ".parse::<CurrencyCode>(),
            Err(CurrencyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_builtin_rates_include_every_currency() {
        let rates = ExchangeRates::builtin();
        for currency in CurrencyCode::ALL {
            assert!(rates.rate(currency).is_some(), "missing rate for {currency}");
        }
        assert_eq!(rates.rate(CurrencyCode::BASE), Some(Decimal::ONE));
    }

    #[test]
    fn test_apply_overrides() {
        let mut rates = ExchangeRates::builtin();
        rates.apply_overrides("EUR=0.5, gbp=0.25").unwrap();
        assert_eq!(rates.rate(CurrencyCode::EUR), Some(dec!(0.5)));
        assert_eq!(rates.rate(CurrencyCode::GBP), Some(dec!(0.25)));
    }

    #[test]
    fn test_apply_overrides_rejects_bad_entries() {
        let mut rates = ExchangeRates::builtin();
        assert!(matches!(
            rates.apply_overrides("EUR"),
            Err(CurrencyError::MalformedEntry(_))
        ));
        assert!(matches!(
            rates.apply_overrides("EUR=abc"),
            Err(CurrencyError::InvalidRate { .. })
        ));
        assert!(matches!(
            rates.apply_overrides("EUR=-1"),
            Err(CurrencyError::NonPositiveRate(CurrencyCode::EUR))
        ));
        assert!(matches!(
            rates.apply_overrides("IDR=1000000.01"),
            Err(CurrencyError::RateTooLarge(CurrencyCode::IDR))
        ));
        assert!(matches!(
            rates.apply_overrides("IDR=79228162514264337593543950335"),
            Err(CurrencyError::RateTooLarge(CurrencyCode::IDR))
        ));
        assert_eq!(rates.rate(CurrencyCode::IDR), Some(dec!(15500)));
        assert!(matches!(
            rates.apply_overrides("USD=2"),
            Err(CurrencyError::BaseRateFixed(CurrencyCode::USD))
        ));
    }

    #[test]
    fn test_convert() {
        let rates = ExchangeRates::builtin();
        let money = rates.convert(dec!(100), CurrencyCode::EUR).unwrap();
        assert_eq!(money.amount, dec!(92.00));
        assert_eq!(money.currency_code, CurrencyCode::EUR);

        assert!(ExchangeRates::base_only().convert(dec!(1), CurrencyCode::EUR).is_none());
    }

    #[test]
    fn test_convert_overflow_is_none() {
        let rates = ExchangeRates::builtin();
        assert!(rates.convert(Decimal::MAX, CurrencyCode::IDR).is_none());
    }

    #[test]
    fn test_amount_bounds() {
        assert_eq!(MAX_AMOUNT, dec!(100000000000000000000));
        assert_eq!(MAX_EXCHANGE_RATE, dec!(1000000));

        let mut rates = ExchangeRates::builtin();
        rates.set_rate(CurrencyCode::IDR, MAX_EXCHANGE_RATE).unwrap();
        let money = rates.convert(MAX_AMOUNT, CurrencyCode::IDR).unwrap();
        assert_eq!(money.amount, dec!(100000000000000000000000000));
        assert_eq!(money.to_string(), "Rp100000000000000000000000000");
    }
}
