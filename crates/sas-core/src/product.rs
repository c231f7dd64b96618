use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product that passed (or was scored by) the viability check upstream,
/// as handed to the campaign builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductValidation {
    pub product_name: String,
    /// Affiliate network the offer lives on, e.g. `"ClickBank"`.
    #[serde(default)]
    pub platform: Option<String>,
    /// Payout per conversion, in the campaign currency.
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub guarantee_days: Option<u32>,
    /// Extra base keywords beyond the product name.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub validation_score: Option<u8>,
    #[serde(default)]
    pub is_viable: Option<bool>,
}

impl ProductValidation {
    #[must_use]
    pub fn named(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            ..Self::default()
        }
    }

    /// Commission when present and strictly positive.
    #[must_use]
    pub fn positive_commission(&self) -> Option<Decimal> {
        self.commission.filter(|c| c.is_sign_positive() && !c.is_zero())
    }

    /// Product name with surrounding whitespace removed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.product_name.trim()
    }
}
