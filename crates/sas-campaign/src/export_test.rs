use chrono::NaiveDate;
use rust_decimal::Decimal;
use sas_core::{
    AdEntry, AdGroup, BidStrategy, CampaignBudget, CampaignExtensions, CampaignLocale,
    CampaignStatus, Financials, KeywordCase, KeywordEntry, Locations, MatchType,
    ProductValidation, Sitelink, TextExtension,
};

use super::*;
use crate::{AssemblyRequest, CampaignAssembler, CampaignOverrides};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample_campaign() -> CampaignData {
    CampaignData {
        name: "Skinatrin_IT_20260115_ClickBank_45EUR".to_string(),
        campaign_type: "Search".to_string(),
        status: CampaignStatus::Paused,
        budget: CampaignBudget {
            daily: dec("225"),
            currency: "EUR".to_string(),
        },
        bid_strategy: BidStrategy::TargetCpa,
        target_cpa: Some(dec("20.25")),
        financials: Financials {
            commission: dec("45"),
            target_cpa: dec("20.25"),
            max_cpa: dec("36"),
            stop_loss: dec("45"),
            test_budget: dec("225"),
        },
        locale: CampaignLocale {
            country: "IT".to_string(),
            language: "it-IT".to_string(),
            currency: "EUR".to_string(),
            is_default: false,
        },
        locations: Locations {
            targets: vec!["Italy".to_string()],
            excluded: vec!["India".to_string(), "Nigeria".to_string()],
        },
        languages: vec!["it".to_string()],
        ad_groups: vec![AdGroup {
            name: "Skinatrin".to_string(),
            status: CampaignStatus::Paused,
        }],
        keywords: vec![
            KeywordEntry {
                keyword: "skinatrin".to_string(),
                case: KeywordCase::Lowercase,
                match_type: MatchType::Broad,
                ad_group: "Skinatrin".to_string(),
            },
            KeywordEntry {
                keyword: "SKINATRIN".to_string(),
                case: KeywordCase::Uppercase,
                match_type: MatchType::Broad,
                ad_group: "Skinatrin".to_string(),
            },
        ],
        ads: vec![AdEntry {
            ad_group: "Skinatrin".to_string(),
            headlines: vec![
                "Compra Skinatrin Ora".to_string(),
                "Skinatrin Sito Ufficiale".to_string(),
            ],
            descriptions: vec![
                "Ordina Skinatrin dal sito ufficiale. Spedizione rapida e pagamento sicuro."
                    .to_string(),
            ],
            final_url: "https://skinatrin.example/it".to_string(),
            display_url: "skinatrin".to_string(),
        }],
        extensions: CampaignExtensions {
            sitelinks: vec![Sitelink {
                category: "official".to_string(),
                text: "Sito Ufficiale".to_string(),
                final_url: "https://skinatrin.example/it".to_string(),
            }],
            callouts: vec![TextExtension {
                category: "shipping".to_string(),
                text: "Spedizione Rapida".to_string(),
            }],
            snippets: vec![TextExtension {
                category: "Tipi".to_string(),
                text: "Confezione Singola".to_string(),
            }],
        },
    }
}

/// Minimal RFC 4180 reader for checking the writer's output.
fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => row.push(std::mem::take(&mut field)),
            ('\n', false) => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    assert!(!in_quotes, "unterminated quoted field");
    assert!(field.is_empty() && row.is_empty(), "missing final newline");
    rows
}

fn write_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(",");
            format!("{line}\n")
        })
        .collect()
}

fn header_of(bundle: &CsvBundle, name: &str) -> String {
    bundle
        .get(name)
        .and_then(|content| content.lines().next())
        .unwrap_or_default()
        .to_string()
}

// -----------------------------------------------------------------------
// escape_field
// -----------------------------------------------------------------------

#[test]
fn plain_fields_are_not_quoted() {
    assert_eq!(escape_field("Skinatrin"), "Skinatrin");
    assert!(matches!(escape_field("Skinatrin"), Cow::Borrowed(_)));
    assert_eq!(escape_field(""), "");
}

#[test]
fn special_fields_are_quoted() {
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    assert_eq!(escape_field("cr\rhere"), "\"cr\rhere\"");
}

// -----------------------------------------------------------------------
// generate_all_csvs
// -----------------------------------------------------------------------

#[test]
fn bundle_holds_every_file_in_order() {
    let bundle = generate_all_csvs(&sample_campaign());
    assert_eq!(bundle.len(), 7);
    assert_eq!(bundle.names(), EXPORT_ORDER.to_vec());
}

#[test]
fn headers_match_import_layout() {
    let bundle = generate_all_csvs(&sample_campaign());
    assert_eq!(
        header_of(&bundle, "campaigns.csv"),
        "Campaign,Campaign Type,Status,Budget,Budget Type,Bid Strategy,Target CPA,Currency,Target Locations,Excluded Locations"
    );
    assert_eq!(header_of(&bundle, "ad-groups.csv"), "Campaign,Ad Group,Status");
    assert_eq!(header_of(&bundle, "keywords.csv"), "Keyword,Match Type,Status");
    assert_eq!(header_of(&bundle, "ads.csv"), "Headlines,Descriptions");
    assert_eq!(
        header_of(&bundle, "sitelinks.csv"),
        "Campaign,Sitelink Text,Category,Final URL"
    );
    assert_eq!(header_of(&bundle, "callouts.csv"), "Campaign,Callout Text");
    assert_eq!(header_of(&bundle, "snippets.csv"), "Campaign,Header,Value");
}

#[test]
fn campaign_row_formats_money_and_locations() {
    let bundle = generate_all_csvs(&sample_campaign());
    let rows = parse_csv(bundle.get("campaigns.csv").unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        vec![
            "Skinatrin_IT_20260115_ClickBank_45EUR",
            "Search",
            "Paused",
            "225.00",
            "Daily",
            "Target CPA",
            "20.25",
            "EUR",
            "Italy",
            "India; Nigeria",
        ]
    );
}

#[test]
fn missing_target_cpa_leaves_cell_empty() {
    let mut campaign = sample_campaign();
    campaign.bid_strategy = BidStrategy::MaximizeConversions;
    campaign.target_cpa = None;
    let bundle = generate_all_csvs(&campaign);
    let rows = parse_csv(bundle.get("campaigns.csv").unwrap());
    assert_eq!(rows[1][5], "Maximize Conversions");
    assert_eq!(rows[1][6], "");
}

#[test]
fn keywords_emit_one_row_per_case() {
    let bundle = generate_all_csvs(&sample_campaign());
    assert_eq!(
        bundle.get("keywords.csv").unwrap(),
        "Keyword,Match Type,Status\nskinatrin,Broad,Paused\nSKINATRIN,Broad,Paused\n"
    );
}

#[test]
fn ads_join_copy_with_pipes() {
    let bundle = generate_all_csvs(&sample_campaign());
    let rows = parse_csv(bundle.get("ads.csv").unwrap());
    assert_eq!(rows[1][0], "Compra Skinatrin Ora | Skinatrin Sito Ufficiale");
    assert_eq!(rows[1].len(), 2);
}

#[test]
fn extension_files_reference_the_campaign() {
    let campaign = sample_campaign();
    let bundle = generate_all_csvs(&campaign);
    assert_eq!(
        bundle.get("sitelinks.csv").unwrap(),
        format!(
            "Campaign,Sitelink Text,Category,Final URL\n{},Sito Ufficiale,official,https://skinatrin.example/it\n",
            campaign.name
        )
    );
    assert_eq!(
        bundle.get("callouts.csv").unwrap(),
        format!("Campaign,Callout Text\n{},Spedizione Rapida\n", campaign.name)
    );
    assert_eq!(
        bundle.get("snippets.csv").unwrap(),
        format!("Campaign,Header,Value\n{},Tipi,Confezione Singola\n", campaign.name)
    );
}

#[test]
fn empty_extensions_still_produce_headers() {
    let mut campaign = sample_campaign();
    campaign.extensions = CampaignExtensions::default();
    let bundle = generate_all_csvs(&campaign);
    assert_eq!(bundle.get("callouts.csv").unwrap(), "Campaign,Callout Text\n");
    assert_eq!(bundle.get("snippets.csv").unwrap(), "Campaign,Header,Value\n");
}

#[test]
fn awkward_values_survive_a_parse_round_trip() {
    let mut campaign = sample_campaign();
    campaign.name = "Skin, \"Pro\" Edition".to_string();
    campaign.ads[0].headlines = vec![
        "Buy \"Now\"".to_string(),
        "Two, Three".to_string(),
    ];
    campaign.ads[0].descriptions = vec!["First line\nSecond line".to_string()];
    campaign.extensions.callouts[0].text = "Qualità, Garantita".to_string();

    let bundle = generate_all_csvs(&campaign);
    for file in &bundle {
        let rows = parse_csv(&file.content);
        let header_width = rows[0].len();
        assert!(
            rows.iter().all(|r| r.len() == header_width),
            "{} has ragged rows",
            file.name
        );
        assert_eq!(write_csv(&rows), file.content, "{} round trip", file.name);
    }

    let ads = parse_csv(bundle.get("ads.csv").unwrap());
    assert_eq!(ads[1][0], "Buy \"Now\" | Two, Three");
    assert_eq!(ads[1][1], "First line\nSecond line");
    let callouts = parse_csv(bundle.get("callouts.csv").unwrap());
    assert_eq!(callouts[1][0], "Skin, \"Pro\" Edition");
}

#[test]
fn export_is_deterministic() {
    let campaign = sample_campaign();
    assert_eq!(generate_all_csvs(&campaign), generate_all_csvs(&campaign));
}

#[test]
fn bundle_serializes_as_ordered_object() {
    let bundle = generate_all_csvs(&sample_campaign());
    let json = serde_json::to_string(&bundle).unwrap();
    let positions: Vec<usize> = EXPORT_ORDER
        .iter()
        .map(|name| json.find(&format!("\"{name}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["keywords.csv"],
        "Keyword,Match Type,Status\nskinatrin,Broad,Paused\nSKINATRIN,Broad,Paused\n"
    );
}

#[test]
fn assembled_campaign_exports_cleanly() {
    let request = AssemblyRequest {
        product: ProductValidation {
            platform: Some("ClickBank".to_string()),
            commission: Some(dec("45")),
            price: Some(dec("29.99")),
            guarantee_days: Some(60),
            ..ProductValidation::named("Skinatrin")
        },
        affiliate_url: Some("https://hop.example.net/?aff=42".to_string()),
        presell_url: None,
        country: Some("IT".to_string()),
        created_on: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        overrides: CampaignOverrides::default(),
    };
    let campaign = CampaignAssembler::new(sas_core::CampaignPolicy::default())
        .assemble(&request)
        .unwrap()
        .campaign;
    let bundle = generate_all_csvs(&campaign);

    let keywords = parse_csv(bundle.get("keywords.csv").unwrap());
    assert_eq!(keywords.len(), 3);
    let ads = parse_csv(bundle.get("ads.csv").unwrap());
    assert!(ads[1][0].contains("Compra Skinatrin Ora"));
    for file in &bundle {
        assert!(file.content.ends_with('\n'));
        assert_eq!(write_csv(&parse_csv(&file.content)), file.content);
    }
}
