//! `campaign` command: assemble a campaign from the command line and write
//! the import bundle to disk.
//!
//! The bundle directory gets one file per CSV in import order plus
//! `campaign.json` with the assembled campaign and its report.

use std::path::{Path, PathBuf};

use clap::Args;
use rust_decimal::Decimal;

use sas_campaign::{
    generate_all_csvs, AssembledCampaign, AssemblyRequest, CampaignAssembler, CampaignOverrides,
    CsvBundle,
};
use sas_core::{CampaignPolicy, MatchType, ProductValidation};

pub(crate) const CAMPAIGN_JSON: &str = "campaign.json";

#[derive(Debug, Args)]
pub(crate) struct CampaignArgs {
    /// Product name used in copy, keywords and the campaign name
    #[arg(long)]
    pub product: String,

    /// Affiliate (hop) link the ads ultimately send traffic to
    #[arg(long)]
    pub affiliate_url: String,

    /// Presell page placed in front of the affiliate link
    #[arg(long)]
    pub presell_url: Option<String>,

    /// ISO country code; unknown codes fall back to US
    #[arg(long)]
    pub country: Option<String>,

    /// Payout per conversion in the campaign currency
    #[arg(long, value_parser = parse_amount)]
    pub commission: Option<Decimal>,

    /// Product price shown in copy
    #[arg(long, value_parser = parse_amount)]
    pub price: Option<Decimal>,

    /// Affiliate network, e.g. ClickBank
    #[arg(long)]
    pub platform: Option<String>,

    #[arg(long)]
    pub guarantee_days: Option<u32>,

    /// Extra base keyword (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    /// Replace the generated campaign name
    #[arg(long)]
    pub name: Option<String>,

    /// Replace the computed daily budget
    #[arg(long, value_parser = parse_amount)]
    pub daily_budget: Option<Decimal>,

    /// Bid with this target CPA instead of the computed one
    #[arg(long, value_parser = parse_amount)]
    pub target_cpa: Option<Decimal>,

    /// broad, phrase or exact; defaults to the policy's match type
    #[arg(long)]
    pub match_type: Option<MatchType>,

    /// Campaign policy YAML; defaults to SAS_POLICY_PATH
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Directory the bundle is written to
    #[arg(long, default_value = "./export")]
    pub out_dir: PathBuf,
}

impl CampaignArgs {
    pub(crate) fn into_request(self, created_on: chrono::NaiveDate) -> AssemblyRequest {
        AssemblyRequest {
            product: ProductValidation {
                product_name: self.product,
                platform: self.platform,
                commission: self.commission,
                price: self.price,
                guarantee_days: self.guarantee_days,
                keywords: self.keywords,
                ..ProductValidation::default()
            },
            affiliate_url: Some(self.affiliate_url),
            presell_url: self.presell_url,
            country: self.country,
            created_on,
            overrides: CampaignOverrides {
                name: self.name,
                daily_budget: self.daily_budget,
                target_cpa: self.target_cpa,
                status: None,
            },
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{raw}': {e}"))
}

pub(crate) fn apply_match_type(
    mut policy: CampaignPolicy,
    match_type: Option<MatchType>,
) -> CampaignPolicy {
    if let Some(match_type) = match_type {
        policy.default_match_type = match_type;
    }
    policy
}

/// Assemble the campaign described by `args` and write its bundle.
///
/// # Errors
///
/// Returns an error if the policy file is invalid, the product input is
/// rejected by the assembler, or the bundle cannot be written.
pub(crate) async fn run_campaign(args: CampaignArgs, policy_path: &Path) -> anyhow::Result<()> {
    let policy = sas_core::load_policy_or_default(policy_path)?;
    let policy = apply_match_type(policy, args.match_type);
    let out_dir = args.out_dir.clone();
    let request = args.into_request(chrono::Utc::now().date_naive());

    let assembled = CampaignAssembler::new(policy).assemble(&request)?;
    let bundle = generate_all_csvs(&assembled.campaign);
    let written = write_bundle(&out_dir, &assembled, &bundle).await?;

    println!("campaign: {}", assembled.campaign.name);
    println!(
        "copy: {} headlines, {} descriptions (average score {})",
        assembled.report.headlines_kept,
        assembled.report.descriptions_kept,
        assembled.report.average_score
    );
    println!("import order:");
    for (position, path) in written.iter().enumerate() {
        println!("  {}. {}", position + 1, path.display());
    }
    Ok(())
}

/// Write every CSV in import order, then `campaign.json`.
///
/// Returns the CSV paths in the order they were written.
pub(crate) async fn write_bundle(
    out_dir: &Path,
    assembled: &AssembledCampaign,
    bundle: &CsvBundle,
) -> anyhow::Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(out_dir).await?;

    let mut written = Vec::with_capacity(bundle.len());
    for file in bundle {
        let path = out_dir.join(file.name);
        tokio::fs::write(&path, &file.content).await?;
        written.push(path);
    }

    tokio::fs::write(
        out_dir.join(CAMPAIGN_JSON),
        serde_json::to_string_pretty(assembled)?,
    )
    .await?;

    tracing::info!(
        dir = %out_dir.display(),
        files = written.len(),
        "campaign bundle written"
    );
    Ok(written)
}
