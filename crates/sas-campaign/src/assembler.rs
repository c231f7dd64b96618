//! Builds a [`CampaignData`] from a validated product and its landing URLs.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sas_core::{
    resolve_locale, AdCopyKind, AdCopyUnit, AdEntry, AdGroup, BidStrategy, CampaignBudget,
    CampaignData, CampaignExtensions, CampaignLocale, CampaignPolicy, CampaignStatus,
    CountryLocaleRecord, Locations, ProductValidation, Sitelink, TextExtension,
};
use sas_optimizer::{fit_to_limit, optimize, optimize_with, KeywordMatcher};

use crate::financials::compute_financials;
use crate::keywords::{base_keywords, expand_keyword_cases};
use crate::resources::{resolve_templates, CopyField, FallbackLevel, Placeholders};
use crate::urls::{display_host, resolve_landing_urls};
use crate::CampaignError;

pub const MAX_HEADLINES: usize = 15;
pub const MAX_DESCRIPTIONS: usize = 4;
/// Responsive search ads need at least this many of each.
const MIN_HEADLINES: usize = 3;
const MIN_DESCRIPTIONS: usize = 2;
/// Sitelink, callout and snippet text limit.
pub const EXTENSION_TEXT_LIMIT: usize = 25;

const CAMPAIGN_TYPE: &str = "Search";
const DEFAULT_PLATFORM: &str = "Affiliate";
const FALLBACK_PRODUCT_NAME: &str = "Product";

/// Caller-supplied values that replace computed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignOverrides {
    pub name: Option<String>,
    pub daily_budget: Option<Decimal>,
    pub target_cpa: Option<Decimal>,
    pub status: Option<CampaignStatus>,
}

#[derive(Debug, Clone)]
pub struct AssemblyRequest {
    pub product: ProductValidation,
    pub affiliate_url: Option<String>,
    pub presell_url: Option<String>,
    /// ISO country code; unknown or missing codes use the default locale.
    pub country: Option<String>,
    /// Date stamped into the campaign name.
    pub created_on: NaiveDate,
    pub overrides: CampaignOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingPlaceholder,
    Truncated,
    Duplicate,
    OverCap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedCandidate {
    pub field: CopyField,
    pub template: String,
    pub reason: DropReason,
}

/// Which locale resource fed each copy field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSource {
    pub field: CopyField,
    pub locale_tag: String,
    pub level: FallbackLevel,
}

/// Optimization summary for one assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReport {
    pub headline_candidates: usize,
    pub headlines_kept: usize,
    pub description_candidates: usize,
    pub descriptions_kept: usize,
    /// Mean optimization score of the kept headlines and descriptions.
    pub average_score: u8,
    pub display_url_score: u8,
    pub dropped: Vec<DroppedCandidate>,
    pub sources: Vec<FieldSource>,
    pub locale_is_default: bool,
    pub uses_presell: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledCampaign {
    pub campaign: CampaignData,
    pub report: AssemblyReport,
}

pub struct CampaignAssembler {
    policy: CampaignPolicy,
}

impl CampaignAssembler {
    #[must_use]
    pub fn new(policy: CampaignPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &CampaignPolicy {
        &self.policy
    }

    /// Assemble a complete campaign.
    ///
    /// # Errors
    ///
    /// Fails only when the affiliate URL is missing
    /// ([`CampaignError::MissingRequiredField`]) or unparsable
    /// ([`CampaignError::InvalidUrl`]). Unknown countries, invalid presell
    /// URLs, missing commission and unfillable templates all degrade instead.
    pub fn assemble(&self, request: &AssemblyRequest) -> Result<AssembledCampaign, CampaignError> {
        let landing = resolve_landing_urls(
            request.affiliate_url.as_deref(),
            request.presell_url.as_deref(),
        )?;
        let resolved = resolve_locale(request.country.as_deref());
        let record = resolved.record;
        let product = &request.product;
        let overrides = &request.overrides;

        let product_name = match product.display_name() {
            "" => {
                tracing::warn!("product has no name; templates naming it will be skipped");
                None
            }
            name => Some(name.to_string()),
        };
        let group_name = product_name
            .clone()
            .unwrap_or_else(|| FALLBACK_PRODUCT_NAME.to_string());

        let financials = compute_financials(&self.policy, product.positive_commission(), record);
        let (mut bid_strategy, mut target_cpa) = if financials.commission > Decimal::ZERO {
            (BidStrategy::TargetCpa, Some(financials.target_cpa))
        } else {
            tracing::warn!(
                product = %group_name,
                "no positive commission; falling back to Maximize Conversions"
            );
            (BidStrategy::MaximizeConversions, None)
        };
        if let Some(cpa) = overrides.target_cpa.filter(|c| *c > Decimal::ZERO) {
            bid_strategy = BidStrategy::TargetCpa;
            target_cpa = Some(cpa);
        }
        let daily_budget = overrides
            .daily_budget
            .filter(|b| *b > Decimal::ZERO)
            .unwrap_or(financials.test_budget);
        let status = overrides.status.unwrap_or(self.policy.campaign_status);

        let placeholders = Placeholders {
            product: product_name,
            price: product.price.map(|p| record.format_price(p)),
            guarantee: product
                .guarantee_days
                .filter(|d| *d > 0)
                .map(|d| d.to_string()),
        };
        let bases = base_keywords(product);
        let matcher = KeywordMatcher::new(&bases);

        let mut report = AssemblyReport {
            headline_candidates: 0,
            headlines_kept: 0,
            description_candidates: 0,
            descriptions_kept: 0,
            average_score: 0,
            display_url_score: 0,
            dropped: Vec::new(),
            sources: Vec::new(),
            locale_is_default: resolved.is_default,
            uses_presell: landing.uses_presell,
        };

        let headlines = build_copy(
            record,
            CopyField::Headlines,
            AdCopyKind::Headline,
            MAX_HEADLINES,
            &placeholders,
            &matcher,
            &mut report,
        );
        let descriptions = build_copy(
            record,
            CopyField::Descriptions,
            AdCopyKind::Description,
            MAX_DESCRIPTIONS,
            &placeholders,
            &matcher,
            &mut report,
        );
        report.headline_candidates = headlines.candidates;
        report.headlines_kept = headlines.texts.len();
        report.description_candidates = descriptions.candidates;
        report.descriptions_kept = descriptions.texts.len();
        report.average_score = mean_score(headlines.scores.iter().chain(&descriptions.scores));

        if headlines.texts.len() < MIN_HEADLINES || descriptions.texts.len() < MIN_DESCRIPTIONS {
            tracing::warn!(
                headlines = headlines.texts.len(),
                descriptions = descriptions.texts.len(),
                "ad has fewer headlines or descriptions than responsive search ads require"
            );
        }

        let final_url = landing.final_url.to_string();
        let display = optimize(&AdCopyUnit::new(
            AdCopyKind::DisplayUrl,
            display_host(&landing.final_url),
        ));
        report.display_url_score = display.optimization_score;

        let extensions = build_extensions(record, &placeholders, &final_url, &mut report);

        let name = overrides
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(
                || campaign_name(&group_name, record, product, request.created_on),
                str::to_string,
            );

        let campaign = CampaignData {
            name,
            campaign_type: CAMPAIGN_TYPE.to_string(),
            status,
            budget: CampaignBudget {
                daily: daily_budget,
                currency: record.currency.to_string(),
            },
            bid_strategy,
            target_cpa,
            financials,
            locale: CampaignLocale {
                country: record.code.to_string(),
                language: record.language.to_string(),
                currency: record.currency.to_string(),
                is_default: resolved.is_default,
            },
            locations: locations_for(&self.policy, record),
            languages: vec![record.language_family().to_string()],
            ad_groups: vec![AdGroup {
                name: group_name.clone(),
                status,
            }],
            keywords: expand_keyword_cases(&bases, self.policy.default_match_type, &group_name),
            ads: vec![AdEntry {
                ad_group: group_name,
                headlines: headlines.texts,
                descriptions: descriptions.texts,
                final_url,
                display_url: display.optimized,
            }],
            extensions,
        };

        tracing::info!(
            campaign = %campaign.name,
            country = record.code,
            headlines = report.headlines_kept,
            descriptions = report.descriptions_kept,
            keywords = campaign.keywords.len(),
            average_score = report.average_score,
            "campaign assembled"
        );

        Ok(AssembledCampaign { campaign, report })
    }
}

struct BuiltCopy {
    candidates: usize,
    texts: Vec<String>,
    scores: Vec<u8>,
}

fn build_copy(
    record: &CountryLocaleRecord,
    field: CopyField,
    kind: AdCopyKind,
    cap: usize,
    placeholders: &Placeholders,
    matcher: &KeywordMatcher,
    report: &mut AssemblyReport,
) -> BuiltCopy {
    let resolved = resolve_templates(record, field);
    report.sources.push(FieldSource {
        field,
        locale_tag: resolved.tag.to_string(),
        level: resolved.level,
    });

    let mut built = BuiltCopy {
        candidates: resolved.templates.len(),
        texts: Vec::new(),
        scores: Vec::new(),
    };
    let mut seen = HashSet::new();
    let mut reject = |template: &str, reason: DropReason| {
        tracing::debug!(?field, template, ?reason, "dropping copy candidate");
        report.dropped.push(DroppedCandidate {
            field,
            template: template.to_string(),
            reason,
        });
    };

    for template in resolved.templates {
        let Some(rendered) = placeholders.render(template.text) else {
            reject(template.text, DropReason::MissingPlaceholder);
            continue;
        };
        let result = optimize_with(&AdCopyUnit::new(kind, rendered), matcher);
        if result.truncated {
            reject(template.text, DropReason::Truncated);
            continue;
        }
        let text = result.optimized.trim().to_string();
        if !seen.insert(text.to_lowercase()) {
            reject(template.text, DropReason::Duplicate);
            continue;
        }
        if built.texts.len() >= cap {
            reject(template.text, DropReason::OverCap);
            continue;
        }
        built.texts.push(text);
        built.scores.push(result.optimization_score);
    }
    built
}

fn build_extensions(
    record: &CountryLocaleRecord,
    placeholders: &Placeholders,
    final_url: &str,
    report: &mut AssemblyReport,
) -> CampaignExtensions {
    let mut texts = |field: CopyField| -> Vec<(String, String)> {
        let resolved = resolve_templates(record, field);
        report.sources.push(FieldSource {
            field,
            locale_tag: resolved.tag.to_string(),
            level: resolved.level,
        });
        resolved
            .templates
            .iter()
            .filter_map(|t| {
                let rendered = placeholders.render(t.text);
                if rendered.is_none() {
                    report.dropped.push(DroppedCandidate {
                        field,
                        template: t.text.to_string(),
                        reason: DropReason::MissingPlaceholder,
                    });
                }
                rendered.map(|text| {
                    (
                        t.category.to_string(),
                        fit_to_limit(&text, EXTENSION_TEXT_LIMIT),
                    )
                })
            })
            .collect()
    };

    let sitelinks = texts(CopyField::Sitelinks)
        .into_iter()
        .map(|(category, text)| Sitelink {
            category,
            text,
            final_url: final_url.to_string(),
        })
        .collect();
    let callouts = texts(CopyField::Callouts)
        .into_iter()
        .map(|(category, text)| TextExtension { category, text })
        .collect();
    let snippets = texts(CopyField::Snippets)
        .into_iter()
        .map(|(category, text)| TextExtension { category, text })
        .collect();

    CampaignExtensions {
        sitelinks,
        callouts,
        snippets,
    }
}

fn locations_for(policy: &CampaignPolicy, record: &CountryLocaleRecord) -> Locations {
    Locations {
        targets: vec![record.name.to_string()],
        excluded: policy
            .excluded_locations
            .iter()
            .filter(|name| !name.trim().eq_ignore_ascii_case(record.name))
            .cloned()
            .collect(),
    }
}

/// `{product}_{CC}_{YYYYMMDD}_{platform}_{commission}{CUR}`, whitespace runs
/// replaced by `-`.
fn campaign_name(
    product_name: &str,
    record: &CountryLocaleRecord,
    product: &ProductValidation,
    created_on: NaiveDate,
) -> String {
    let platform = product
        .platform
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PLATFORM);
    let commission = product
        .positive_commission()
        .map_or_else(|| "0".to_string(), |c| c.normalize().to_string());
    format!(
        "{}_{}_{}_{}_{}{}",
        hyphenate(product_name),
        record.code,
        created_on.format("%Y%m%d"),
        hyphenate(platform),
        commission,
        record.currency
    )
}

fn hyphenate(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("-")
}

#[allow(clippy::cast_possible_truncation)]
fn mean_score<'a>(scores: impl Iterator<Item = &'a u8>) -> u8 {
    let (sum, count) = scores.fold((0u32, 0u32), |(sum, count), s| {
        (sum + u32::from(*s), count + 1)
    });
    if count == 0 {
        return 0;
    }
    ((sum + count / 2) / count) as u8
}

#[cfg(test)]
#[path = "assembler_test.rs"]
mod tests;
