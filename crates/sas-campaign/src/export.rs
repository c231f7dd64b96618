//! Bulk-import CSV rendering.
//!
//! Every file is rebuilt from the [`CampaignData`] alone, so identical
//! campaigns always export to identical bytes.

use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};

use sas_core::{format_amount, CampaignData};

/// File names in the order the import tool expects them.
pub const EXPORT_ORDER: [&str; 7] = [
    "campaigns.csv",
    "ad-groups.csv",
    "keywords.csv",
    "ads.csv",
    "sitelinks.csv",
    "callouts.csv",
    "snippets.csv",
];

const BUDGET_TYPE: &str = "Daily";
const LOCATION_SEPARATOR: &str = "; ";
const COPY_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub name: &'static str,
    pub content: String,
}

/// The rendered files, kept in [`EXPORT_ORDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvBundle {
    files: Vec<CsvFile>,
}

impl CsvBundle {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CsvFile> {
        self.files.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.files.iter().map(|f| f.name).collect()
    }
}

impl<'a> IntoIterator for &'a CsvBundle {
    type Item = &'a CsvFile;
    type IntoIter = std::slice::Iter<'a, CsvFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Serializes as `{ "campaigns.csv": "...", ... }` in export order.
impl Serialize for CsvBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for file in &self.files {
            map.serialize_entry(file.name, &file.content)?;
        }
        map.end()
    }
}

/// Quote a field when it contains a comma, quote, CR or LF; internal quotes
/// are doubled.
#[must_use]
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

struct CsvWriter {
    out: String,
}

impl CsvWriter {
    fn new(header: &[&str]) -> Self {
        let mut writer = Self { out: String::new() };
        writer.row(header);
        writer
    }

    fn row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let line = cells
            .iter()
            .map(|c| escape_field(c.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Render every import file for `campaign`.
#[must_use]
pub fn generate_all_csvs(campaign: &CampaignData) -> CsvBundle {
    let renderers: [fn(&CampaignData) -> String; 7] = [
        campaigns_csv,
        ad_groups_csv,
        keywords_csv,
        ads_csv,
        sitelinks_csv,
        callouts_csv,
        snippets_csv,
    ];
    let files = EXPORT_ORDER
        .iter()
        .zip(renderers)
        .map(|(&name, render)| CsvFile {
            name,
            content: render(campaign),
        })
        .collect();

    tracing::info!(campaign = %campaign.name, files = EXPORT_ORDER.len(), "csv bundle generated");
    CsvBundle { files }
}

fn campaigns_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&[
        "Campaign",
        "Campaign Type",
        "Status",
        "Budget",
        "Budget Type",
        "Bid Strategy",
        "Target CPA",
        "Currency",
        "Target Locations",
        "Excluded Locations",
    ]);
    w.row(&[
        c.name.clone(),
        c.campaign_type.clone(),
        c.status.label().to_string(),
        format_amount(c.budget.daily),
        BUDGET_TYPE.to_string(),
        c.bid_strategy.label().to_string(),
        c.target_cpa.map(format_amount).unwrap_or_default(),
        c.budget.currency.clone(),
        c.locations.targets.join(LOCATION_SEPARATOR),
        c.locations.excluded.join(LOCATION_SEPARATOR),
    ]);
    w.finish()
}

fn ad_groups_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&["Campaign", "Ad Group", "Status"]);
    for group in &c.ad_groups {
        w.row(&[c.name.as_str(), group.name.as_str(), group.status.label()]);
    }
    w.finish()
}

fn keywords_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&["Keyword", "Match Type", "Status"]);
    for keyword in &c.keywords {
        w.row(&[
            keyword.keyword.as_str(),
            keyword.match_type.label(),
            c.status.label(),
        ]);
    }
    w.finish()
}

fn ads_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&["Headlines", "Descriptions"]);
    for ad in &c.ads {
        w.row(&[
            ad.headlines.join(COPY_SEPARATOR),
            ad.descriptions.join(COPY_SEPARATOR),
        ]);
    }
    w.finish()
}

fn sitelinks_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&["Campaign", "Sitelink Text", "Category", "Final URL"]);
    for link in &c.extensions.sitelinks {
        w.row(&[
            c.name.as_str(),
            link.text.as_str(),
            link.category.as_str(),
            link.final_url.as_str(),
        ]);
    }
    w.finish()
}

fn callouts_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&["Campaign", "Callout Text"]);
    for callout in &c.extensions.callouts {
        w.row(&[c.name.as_str(), callout.text.as_str()]);
    }
    w.finish()
}

fn snippets_csv(c: &CampaignData) -> String {
    let mut w = CsvWriter::new(&["Campaign", "Header", "Value"]);
    for snippet in &c.extensions.snippets {
        w.row(&[
            c.name.as_str(),
            snippet.category.as_str(),
            snippet.text.as_str(),
        ]);
    }
    w.finish()
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
