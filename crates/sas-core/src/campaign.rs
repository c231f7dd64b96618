//! The assembled campaign, as produced once per request and handed by value
//! to the CSV export.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Enabled,
    Paused,
}

impl CampaignStatus {
    /// Label used by the bulk-import tool.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CampaignStatus::Enabled => "Enabled",
            CampaignStatus::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Broad,
    Phrase,
    Exact,
}

impl MatchType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MatchType::Broad => "Broad",
            MatchType::Phrase => "Phrase",
            MatchType::Exact => "Exact",
        }
    }
}

impl FromStr for MatchType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "broad" => Ok(MatchType::Broad),
            "phrase" => Ok(MatchType::Phrase),
            "exact" => Ok(MatchType::Exact),
            _ => Err(CoreError::UnknownMatchType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    Lowercase,
    Uppercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStrategy {
    TargetCpa,
    MaximizeConversions,
}

impl BidStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BidStrategy::TargetCpa => "Target CPA",
            BidStrategy::MaximizeConversions => "Maximize Conversions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBudget {
    pub daily: Decimal,
    pub currency: String,
}

/// CPA guard rails derived from the commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub commission: Decimal,
    pub target_cpa: Decimal,
    pub max_cpa: Decimal,
    pub stop_loss: Decimal,
    pub test_budget: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignLocale {
    pub country: String,
    pub language: String,
    pub currency: String,
    /// `true` when the country was unknown and defaults were applied.
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locations {
    pub targets: Vec<String>,
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub name: String,
    pub status: CampaignStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    pub keyword: String,
    pub case: KeywordCase,
    pub match_type: MatchType,
    pub ad_group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdEntry {
    pub ad_group: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub final_url: String,
    pub display_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtension {
    pub category: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sitelink {
    pub category: String,
    pub text: String,
    pub final_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignExtensions {
    pub sitelinks: Vec<Sitelink>,
    pub callouts: Vec<TextExtension>,
    pub snippets: Vec<TextExtension>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignData {
    /// Traceable name: product, country, date, platform and commission.
    pub name: String,
    pub campaign_type: String,
    pub status: CampaignStatus,
    pub budget: CampaignBudget,
    pub bid_strategy: BidStrategy,
    pub target_cpa: Option<Decimal>,
    pub financials: Financials,
    pub locale: CampaignLocale,
    pub locations: Locations,
    pub languages: Vec<String>,
    pub ad_groups: Vec<AdGroup>,
    pub keywords: Vec<KeywordEntry>,
    pub ads: Vec<AdEntry>,
    pub extensions: CampaignExtensions,
}
