use super::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sas_campaign::{generate_all_csvs, CampaignAssembler, EXPORT_ORDER};
use sas_core::{CampaignPolicy, MatchType};

use crate::campaign::{apply_match_type, write_bundle, CAMPAIGN_JSON};

fn campaign_args(extra: &[&str]) -> CampaignArgs {
    let mut argv = vec![
        "sas-cli",
        "campaign",
        "--product",
        "Skinatrin",
        "--affiliate-url",
        "https://hop.example.com/skinatrin",
    ];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).expect("expected valid cli args").command {
        Some(Commands::Campaign(args)) => args,
        other => panic!("expected campaign command, got {other:?}"),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sas-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_locales_command() {
    let cli = Cli::try_parse_from(["sas-cli", "locales"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Locales)));
}

#[test]
fn optimize_defaults_to_headline_without_limit() {
    let cli = Cli::try_parse_from(["sas-cli", "optimize", "Buy Skinatrin Today"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Optimize {
            ref kind,
            limit: None,
            ref keywords,
            ..
        }) if kind == "headline" && keywords.is_empty()
    ));
}

#[test]
fn optimize_collects_repeated_keywords() {
    let cli = Cli::try_parse_from([
        "sas-cli",
        "optimize",
        "Natural skin care that works",
        "--kind",
        "description",
        "--keyword",
        "skin",
        "--keyword",
        "natural",
        "--limit",
        "60",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Optimize {
            ref kind,
            limit: Some(60),
            ref keywords,
            ..
        }) if kind == "description" && keywords == &["skin".to_string(), "natural".to_string()]
    ));
}

#[test]
fn optimize_requires_content() {
    assert!(Cli::try_parse_from(["sas-cli", "optimize"]).is_err());
}

#[test]
fn run_optimize_rejects_unknown_kind() {
    let err = run_optimize("Buy now".to_string(), "banner".to_string(), vec![], None)
        .expect_err("unknown kind should fail");
    assert!(err.to_string().contains("banner"));
}

#[test]
fn campaign_requires_product_and_affiliate_url() {
    assert!(Cli::try_parse_from(["sas-cli", "campaign", "--product", "Skinatrin"]).is_err());
    assert!(Cli::try_parse_from([
        "sas-cli",
        "campaign",
        "--affiliate-url",
        "https://hop.example.com"
    ])
    .is_err());
}

#[test]
fn campaign_defaults() {
    let args = campaign_args(&[]);
    assert_eq!(args.out_dir, std::path::PathBuf::from("./export"));
    assert!(args.commission.is_none());
    assert!(args.policy.is_none());
    assert!(args.keywords.is_empty());
}

#[test]
fn campaign_parses_amounts_as_decimals() {
    let args = campaign_args(&["--commission", "45.50", "--price", "49", "--target-cpa", "20"]);
    assert_eq!(args.commission, Some(Decimal::new(4550, 2)));
    assert_eq!(args.price, Some(Decimal::from(49)));
    assert_eq!(args.target_cpa, Some(Decimal::from(20)));
}

#[test]
fn campaign_rejects_malformed_amount() {
    let result = Cli::try_parse_from([
        "sas-cli",
        "campaign",
        "--product",
        "Skinatrin",
        "--affiliate-url",
        "https://hop.example.com",
        "--commission",
        "lots",
    ]);
    assert!(result.is_err());
}

#[test]
fn campaign_match_type_parses_case_insensitively() {
    let args = campaign_args(&["--match-type", "PHRASE"]);
    assert_eq!(args.match_type, Some(MatchType::Phrase));
    assert!(campaign_args(&[]).match_type.is_none());
}

#[test]
fn campaign_rejects_unknown_match_type() {
    let result = Cli::try_parse_from([
        "sas-cli",
        "campaign",
        "--product",
        "Skinatrin",
        "--affiliate-url",
        "https://hop.example.com",
        "--match-type",
        "fuzzy",
    ]);
    assert!(result.is_err());
}

#[test]
fn match_type_flag_overrides_policy_default() {
    let policy = apply_match_type(CampaignPolicy::default(), Some(MatchType::Exact));
    assert_eq!(policy.default_match_type, MatchType::Exact);

    let untouched = apply_match_type(CampaignPolicy::default(), None);
    assert_eq!(
        untouched.default_match_type,
        CampaignPolicy::default().default_match_type
    );
}

#[test]
fn campaign_args_map_onto_assembly_request() {
    let args = campaign_args(&[
        "--country",
        "IT",
        "--platform",
        "ClickBank",
        "--guarantee-days",
        "60",
        "--keyword",
        "skin care",
        "--daily-budget",
        "75",
    ]);
    let created_on = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let request = args.into_request(created_on);

    assert_eq!(request.product.product_name, "Skinatrin");
    assert_eq!(request.product.platform.as_deref(), Some("ClickBank"));
    assert_eq!(request.product.guarantee_days, Some(60));
    assert_eq!(request.product.keywords, vec!["skin care".to_string()]);
    assert_eq!(
        request.affiliate_url.as_deref(),
        Some("https://hop.example.com/skinatrin")
    );
    assert_eq!(request.country.as_deref(), Some("IT"));
    assert_eq!(request.created_on, created_on);
    assert_eq!(request.overrides.daily_budget, Some(Decimal::from(75)));
    assert!(request.overrides.status.is_none());
}

#[tokio::test]
async fn write_bundle_writes_every_csv_in_import_order() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("nested").join("bundle");
    let request = campaign_args(&["--commission", "40", "--country", "IT"])
        .into_request(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    let assembled = CampaignAssembler::new(CampaignPolicy::default())
        .assemble(&request)
        .unwrap();
    let bundle = generate_all_csvs(&assembled.campaign);

    let written = write_bundle(&out_dir, &assembled, &bundle).await.unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, EXPORT_ORDER);
    for file in &bundle {
        let on_disk = std::fs::read_to_string(out_dir.join(file.name)).unwrap();
        assert_eq!(on_disk, file.content);
    }

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join(CAMPAIGN_JSON)).unwrap())
            .unwrap();
    assert_eq!(summary["campaign"]["name"], assembled.campaign.name);
    assert!(summary["report"]["headlinesKept"].as_u64().unwrap() >= 3);
}
