//! Country → language/currency reference data.
//!
//! The table is immutable and read-only after process start. Unknown
//! countries resolve to [`DEFAULT_COUNTRY`] so campaign generation never
//! fails on a locale lookup.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryLocaleRecord {
    /// ISO 3166-1 alpha-2.
    pub code: &'static str,
    pub name: &'static str,
    /// BCP 47 tag, e.g. `"it-IT"`.
    pub language: &'static str,
    /// ISO 4217.
    pub currency: &'static str,
    pub currency_symbol: &'static str,
    pub decimal_separator: char,
    pub display_example: &'static str,
    /// Smallest daily budget worth testing with, in whole currency units.
    pub min_daily_budget: u32,
}

impl CountryLocaleRecord {
    /// Language family of the locale tag (`"pt-BR"` → `"pt"`).
    #[must_use]
    pub fn language_family(&self) -> &'static str {
        self.language.split('-').next().unwrap_or(self.language)
    }

    #[must_use]
    pub fn min_daily_budget(&self) -> Decimal {
        Decimal::from(self.min_daily_budget)
    }

    /// Formats an amount the way ads in this locale show prices, e.g. `€29,99`.
    #[must_use]
    pub fn format_price(&self, amount: Decimal) -> String {
        let plain = format_amount(amount);
        let localized = if self.decimal_separator == '.' {
            plain
        } else {
            plain.replace('.', &self.decimal_separator.to_string())
        };
        format!("{}{}", self.currency_symbol, localized)
    }
}

/// Render a money amount with exactly two decimals, e.g. `20.25`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

#[allow(clippy::too_many_arguments)]
const fn record(
    code: &'static str,
    name: &'static str,
    language: &'static str,
    currency: &'static str,
    currency_symbol: &'static str,
    decimal_separator: char,
    display_example: &'static str,
    min_daily_budget: u32,
) -> CountryLocaleRecord {
    CountryLocaleRecord {
        code,
        name,
        language,
        currency,
        currency_symbol,
        decimal_separator,
        display_example,
        min_daily_budget,
    }
}

pub static COUNTRIES: &[CountryLocaleRecord] = &[
    record("US", "United States", "en-US", "USD", "$", '.', "$29.99", 10),
    record("GB", "United Kingdom", "en-GB", "GBP", "£", '.', "£29.99", 10),
    record("CA", "Canada", "en-CA", "CAD", "$", '.', "$29.99", 15),
    record("AU", "Australia", "en-AU", "AUD", "$", '.', "$29.99", 15),
    record("IE", "Ireland", "en-IE", "EUR", "€", '.', "€29.99", 10),
    record("IT", "Italy", "it-IT", "EUR", "€", ',', "€29,99", 10),
    record("ES", "Spain", "es-ES", "EUR", "€", ',', "€29,99", 10),
    record("MX", "Mexico", "es-MX", "MXN", "$", '.', "$599.00", 200),
    record("PT", "Portugal", "pt-PT", "EUR", "€", ',', "€29,99", 10),
    record("BR", "Brazil", "pt-BR", "BRL", "R$", ',', "R$149,90", 50),
    record("FR", "France", "fr-FR", "EUR", "€", ',', "€29,99", 10),
    record("DE", "Germany", "de-DE", "EUR", "€", ',', "€29,99", 10),
    record("AT", "Austria", "de-AT", "EUR", "€", ',', "€29,99", 10),
    record("CH", "Switzerland", "de-CH", "CHF", "CHF ", '.', "CHF 29.90", 15),
    record("NL", "Netherlands", "nl-NL", "EUR", "€", ',', "€29,99", 10),
    record("PL", "Poland", "pl-PL", "PLN", "zł", ',', "zł119,99", 40),
];

pub const DEFAULT_COUNTRY: &str = "US";

/// Case-insensitive lookup. `UK` is accepted as an alias of `GB`.
#[must_use]
pub fn lookup_country(code: &str) -> Option<&'static CountryLocaleRecord> {
    let code = code.trim();
    let code = if code.eq_ignore_ascii_case("UK") {
        "GB"
    } else {
        code
    };
    COUNTRIES.iter().find(|r| r.code.eq_ignore_ascii_case(code))
}

fn default_record() -> &'static CountryLocaleRecord {
    &COUNTRIES[0]
}

/// A locale lookup outcome, remembering whether defaults were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    pub requested: Option<String>,
    pub record: &'static CountryLocaleRecord,
    pub is_default: bool,
}

/// Resolve a requested country to its locale record, degrading to `en-US`/`USD`.
///
/// An unknown code is logged as a warning and never surfaces as an error.
#[must_use]
pub fn resolve_locale(country: Option<&str>) -> ResolvedLocale {
    let requested = country.map(str::trim).filter(|c| !c.is_empty());
    match requested {
        Some(code) => match lookup_country(code) {
            Some(record) => ResolvedLocale {
                requested: Some(code.to_string()),
                record,
                is_default: false,
            },
            None => {
                tracing::warn!(
                    country = code,
                    fallback = DEFAULT_COUNTRY,
                    "unknown country code; using default locale"
                );
                ResolvedLocale {
                    requested: Some(code.to_string()),
                    record: default_record(),
                    is_default: true,
                }
            }
        },
        None => ResolvedLocale {
            requested: None,
            record: default_record(),
            is_default: true,
        },
    }
}
