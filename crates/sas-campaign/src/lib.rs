//! Campaign assembly and bulk-import export.
//!
//! [`CampaignAssembler`] turns a validated product plus its affiliate and
//! presell URLs into a [`sas_core::CampaignData`]; [`generate_all_csvs`]
//! renders that campaign into the CSV files the ads-management tool imports.

pub mod assembler;
pub mod error;
pub mod export;
pub mod financials;
pub mod keywords;
pub mod resources;
pub mod urls;

pub use assembler::{
    AssembledCampaign, AssemblyReport, AssemblyRequest, CampaignAssembler, CampaignOverrides,
    DropReason, DroppedCandidate, FieldSource,
};
pub use error::CampaignError;
pub use export::{escape_field, generate_all_csvs, CsvBundle, CsvFile, EXPORT_ORDER};
pub use financials::compute_financials;
pub use keywords::{base_keywords, expand_keyword_cases};
pub use resources::{
    resolve_templates, CopyField, FallbackLevel, Placeholders, ResolvedTemplates, Template,
};
