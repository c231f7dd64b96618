pub mod ad_copy;
pub mod app_config;
pub mod campaign;
pub mod config;
pub mod locale;
pub mod policy;
pub mod product;

use thiserror::Error;

pub use ad_copy::{AdCopyKind, AdCopyUnit, OptimizationResult};
pub use app_config::{AppConfig, Environment};
pub use campaign::{
    AdEntry, AdGroup, BidStrategy, CampaignBudget, CampaignData, CampaignExtensions,
    CampaignLocale, CampaignStatus, Financials, KeywordCase, KeywordEntry, Locations, MatchType,
    Sitelink, TextExtension,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use locale::{
    format_amount, lookup_country, resolve_locale, CountryLocaleRecord, ResolvedLocale,
    COUNTRIES, DEFAULT_COUNTRY,
};
pub use policy::{load_policy, load_policy_or_default, CampaignPolicy};
pub use product::ProductValidation;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown ad copy kind: {0}")]
    UnknownAdCopyKind(String),

    #[error("unknown match type: {0}")]
    UnknownMatchType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read policy file {path}: {source}")]
    PolicyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy file: {0}")]
    PolicyFileParse(#[from] serde_yaml::Error),

    #[error("policy validation failed: {0}")]
    Validation(String),
}
