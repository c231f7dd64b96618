mod campaign;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sas_core::{AdCopyUnit, COUNTRIES};
use sas_optimizer::AdCopyUnitInput;

use crate::campaign::CampaignArgs;

#[derive(Debug, Parser)]
#[command(name = "sas-cli")]
#[command(about = "Smart Affiliate System command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fit one piece of ad copy to its character budget and print the result as JSON
    Optimize {
        /// Text to optimize
        content: String,

        /// headline, description or display_url
        #[arg(long, default_value = "headline")]
        kind: String,

        /// Keyword to keep in the optimized text (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Tighter character limit than the platform maximum
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Assemble a campaign for a product and write its CSV bundle
    Campaign(CampaignArgs),
    /// Print the supported country locales as JSON
    Locales,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = sas_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Optimize {
            content,
            kind,
            keywords,
            limit,
        }) => run_optimize(content, kind, keywords, limit)?,
        Some(Commands::Campaign(args)) => {
            let policy_path = args
                .policy
                .clone()
                .unwrap_or_else(|| config.policy_path.clone());
            campaign::run_campaign(args, &policy_path).await?;
        }
        Some(Commands::Locales) => println!("{}", serde_json::to_string_pretty(COUNTRIES)?),
        None => println!("sas-cli ready; run with --help for commands"),
    }

    Ok(())
}

fn run_optimize(
    content: String,
    kind: String,
    keywords: Vec<String>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let unit = AdCopyUnit::try_from(AdCopyUnitInput {
        content,
        kind,
        keywords,
        limit,
    })?;
    let result = sas_optimizer::optimize(&unit);
    if result.truncated {
        tracing::warn!(
            limit = result.limit,
            "no word boundary fit the limit; text was cut mid-word"
        );
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests;
