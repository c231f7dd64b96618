//! Business policy for campaign assembly.
//!
//! The CPA ratios and budget multiplier are policy, not derived invariants,
//! so they live in `config/campaign_policy.yaml` rather than in code.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::campaign::{CampaignStatus, MatchType};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignPolicy {
    /// Fraction of the commission used as the target CPA.
    #[serde(default = "default_target_cpa_ratio")]
    pub target_cpa_ratio: Decimal,
    /// Fraction of the commission above which a conversion is unprofitable.
    #[serde(default = "default_max_cpa_ratio")]
    pub max_cpa_ratio: Decimal,
    /// Test budget = max(currency minimum, multiplier × commission).
    #[serde(default = "default_test_budget_multiplier")]
    pub test_budget_multiplier: Decimal,
    #[serde(default = "default_match_type")]
    pub default_match_type: MatchType,
    #[serde(default = "default_campaign_status")]
    pub campaign_status: CampaignStatus,
    /// Country names always excluded from targeting (high fraud rates).
    #[serde(default = "default_excluded_locations")]
    pub excluded_locations: Vec<String>,
}

fn default_target_cpa_ratio() -> Decimal {
    Decimal::new(45, 2)
}

fn default_max_cpa_ratio() -> Decimal {
    Decimal::new(80, 2)
}

fn default_test_budget_multiplier() -> Decimal {
    Decimal::from(5)
}

fn default_match_type() -> MatchType {
    MatchType::Broad
}

fn default_campaign_status() -> CampaignStatus {
    CampaignStatus::Paused
}

fn default_excluded_locations() -> Vec<String> {
    [
        "India",
        "Pakistan",
        "Bangladesh",
        "Nigeria",
        "Indonesia",
        "Vietnam",
        "Philippines",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for CampaignPolicy {
    fn default() -> Self {
        Self {
            target_cpa_ratio: default_target_cpa_ratio(),
            max_cpa_ratio: default_max_cpa_ratio(),
            test_budget_multiplier: default_test_budget_multiplier(),
            default_match_type: default_match_type(),
            campaign_status: default_campaign_status(),
            excluded_locations: default_excluded_locations(),
        }
    }
}

impl CampaignPolicy {
    /// Check ratio ordering and exclusion-list hygiene.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_cpa_ratio <= Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "target_cpa_ratio must be positive, got {}",
                self.target_cpa_ratio
            )));
        }

        if self.target_cpa_ratio > self.max_cpa_ratio {
            return Err(ConfigError::Validation(format!(
                "target_cpa_ratio {} exceeds max_cpa_ratio {}",
                self.target_cpa_ratio, self.max_cpa_ratio
            )));
        }

        if self.max_cpa_ratio > Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "max_cpa_ratio must not exceed 1, got {}",
                self.max_cpa_ratio
            )));
        }

        if self.test_budget_multiplier <= Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "test_budget_multiplier must be positive, got {}",
                self.test_budget_multiplier
            )));
        }

        let mut seen = HashSet::new();
        for name in &self.excluded_locations {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "excluded location names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(name.trim().to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate excluded location: '{name}'"
                )));
            }
        }

        Ok(())
    }
}

/// Load and validate the campaign policy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_policy(path: &Path) -> Result<CampaignPolicy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PolicyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let policy: CampaignPolicy = serde_yaml::from_str(&content)?;
    policy.validate()?;

    Ok(policy)
}

/// Like [`load_policy`], but a missing file yields the built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_policy_or_default(path: &Path) -> Result<CampaignPolicy, ConfigError> {
    if path.exists() {
        load_policy(path)
    } else {
        tracing::info!(path = %path.display(), "policy file not found; using built-in defaults");
        Ok(CampaignPolicy::default())
    }
}
