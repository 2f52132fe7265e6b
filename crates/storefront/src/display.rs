//! Display currency and language for rendered cart views.
//!
//! Nothing here affects stored cart state: prices are persisted in the base
//! currency and converted only when a view is built.

use devo_store_core::{CurrencyCode, ExchangeRates, Locale, Money, format_amount};
use rust_decimal::Decimal;

use crate::i18n::Messages;

/// Currency, conversion rate and locale used to present amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub currency: CurrencyCode,
    /// Multiplier from base-currency amounts to `currency`.
    pub rate: Decimal,
    pub locale: Locale,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::BASE,
            rate: Decimal::ONE,
            locale: Locale::default(),
        }
    }
}

impl DisplaySettings {
    /// Look up the rate for `currency` in `rates`.
    ///
    /// Returns `None` if `rates` has no entry for `currency`.
    #[must_use]
    pub fn new(currency: CurrencyCode, rates: &ExchangeRates, locale: Locale) -> Option<Self> {
        Some(Self {
            currency,
            rate: rates.rate(currency)?,
            locale,
        })
    }

    /// Convert a base-currency amount.
    ///
    /// Saturates at `Decimal::MAX`. Amounts up to
    /// [`MAX_AMOUNT`](devo_store_core::MAX_AMOUNT) at rates
    /// from an [`ExchangeRates`] table always convert exactly.
    #[must_use]
    pub fn convert(&self, base_amount: Decimal) -> Money {
        Money::new(base_amount.saturating_mul(self.rate), self.currency)
    }

    /// Convert and format a base-currency amount.
    #[must_use]
    pub fn format(&self, base_amount: Decimal) -> String {
        format_amount(
            self.convert(base_amount).amount,
            self.currency.symbol(),
            self.currency.decimal_places(),
        )
    }

    #[must_use]
    pub fn messages(&self) -> &'static Messages {
        Messages::for_locale(self.locale)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_default_is_base_currency() {
        let display = DisplaySettings::default();
        assert_eq!(display.format(dec!(10)), "$10.00");
        assert_eq!(display.convert(dec!(10)).amount, dec!(10));
    }

    #[test]
    fn test_new_uses_rate_table() {
        let display =
            DisplaySettings::new(CurrencyCode::EUR, &ExchangeRates::builtin(), Locale::Fr).unwrap();
        assert_eq!(display.format(dec!(100)), "€92.00");
        assert_eq!(display.messages().total_label, "Total");
    }

    #[test]
    fn test_largest_amount_at_largest_rate_is_exact() {
        let mut rates = ExchangeRates::builtin();
        rates
            .set_rate(CurrencyCode::IDR, devo_store_core::MAX_EXCHANGE_RATE)
            .unwrap();
        let display = DisplaySettings::new(CurrencyCode::IDR, &rates, Locale::Id).unwrap();
        assert_eq!(
            display.convert(devo_store_core::MAX_AMOUNT).amount,
            dec!(100000000000000000000000000)
        );
    }

    #[test]
    fn test_unbounded_rate_saturates() {
        let display = DisplaySettings {
            rate: Decimal::MAX,
            ..DisplaySettings::default()
        };
        assert_eq!(display.convert(dec!(2)).amount, Decimal::MAX);
        assert!(display.format(dec!(2)).starts_with("$79228162514264337593543950335"));
    }

    #[test]
    fn test_new_missing_rate() {
        assert!(
            DisplaySettings::new(CurrencyCode::GBP, &ExchangeRates::base_only(), Locale::En)
                .is_none()
        );
    }
}
