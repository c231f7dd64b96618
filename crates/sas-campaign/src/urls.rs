//! Landing-page URL selection and display-host extraction.

use url::Url;

use crate::CampaignError;

/// The URL ads point to, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingUrls {
    pub final_url: Url,
    /// `true` when the presell page was usable and chosen over the affiliate link.
    pub uses_presell: bool,
}

/// Parse an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns [`CampaignError::InvalidUrl`] naming `field` when `raw` does not
/// parse, uses another scheme, or lacks a host.
pub fn parse_http_url(raw: &str, field: &'static str) -> Result<Url, CampaignError> {
    let url = Url::parse(raw.trim()).map_err(|e| CampaignError::InvalidUrl {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CampaignError::InvalidUrl {
            field,
            reason: format!("unsupported scheme: {}", url.scheme()),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CampaignError::InvalidUrl {
            field,
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}

/// Choose the presell page when it is valid, otherwise the affiliate link.
///
/// # Errors
///
/// Returns [`CampaignError::MissingRequiredField`] when the affiliate URL is
/// absent or blank, and [`CampaignError::InvalidUrl`] when it does not parse.
/// A bad presell URL only logs a warning.
pub fn resolve_landing_urls(
    affiliate_url: Option<&str>,
    presell_url: Option<&str>,
) -> Result<LandingUrls, CampaignError> {
    let affiliate = affiliate_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(CampaignError::MissingRequiredField("affiliateUrl"))?;
    let affiliate = parse_http_url(affiliate, "affiliateUrl")?;

    let presell = presell_url.map(str::trim).filter(|u| !u.is_empty());
    match presell.map(|raw| (raw, parse_http_url(raw, "presellUrl"))) {
        Some((_, Ok(presell))) => Ok(LandingUrls {
            final_url: presell,
            uses_presell: true,
        }),
        Some((raw, Err(e))) => {
            tracing::warn!(
                presell_url = raw,
                error = %e,
                "ignoring invalid presell URL; ads will point at the affiliate link"
            );
            Ok(LandingUrls {
                final_url: affiliate,
                uses_presell: false,
            })
        }
        None => Ok(LandingUrls {
            final_url: affiliate,
            uses_presell: false,
        }),
    }
}

/// Host of `url` without a leading `www.`.
#[must_use]
pub fn display_host(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}
