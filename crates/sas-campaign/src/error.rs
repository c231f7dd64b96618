use thiserror::Error;

/// Errors returned while assembling a campaign.
///
/// Only the affiliate URL is strictly required; every other input degrades to
/// a default instead of failing.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("invalid URL in {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },
}
