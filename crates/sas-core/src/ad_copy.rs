use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The three kinds of ad text the ads platform imposes a character budget on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdCopyKind {
    Headline,
    Description,
    DisplayUrl,
}

impl AdCopyKind {
    /// Platform character limit for this kind.
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            AdCopyKind::Headline => 30,
            AdCopyKind::Description => 90,
            AdCopyKind::DisplayUrl => 15,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AdCopyKind::Headline => "headline",
            AdCopyKind::Description => "description",
            AdCopyKind::DisplayUrl => "display_url",
        }
    }
}

impl std::fmt::Display for AdCopyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdCopyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headline" => Ok(AdCopyKind::Headline),
            "description" => Ok(AdCopyKind::Description),
            "display_url" | "displayurl" | "display-url" => Ok(AdCopyKind::DisplayUrl),
            _ => Err(CoreError::UnknownAdCopyKind(s.to_string())),
        }
    }
}

/// One piece of text destined for an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopyUnit {
    pub content: String,
    pub kind: AdCopyKind,
    /// Keywords to keep in the text when trimming, in priority order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Optional tighter budget; never loosens the platform limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl AdCopyUnit {
    #[must_use]
    pub fn new(kind: AdCopyKind, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind,
            keywords: Vec::new(),
            limit: None,
        }
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Effective character budget: the override when it is positive and
    /// tighter than the platform limit, otherwise the platform limit.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        let platform = self.kind.max_len();
        match self.limit {
            Some(limit) if limit > 0 => limit.min(platform),
            _ => platform,
        }
    }
}

/// Outcome of optimizing a single [`AdCopyUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub kind: AdCopyKind,
    pub original: String,
    pub optimized: String,
    pub original_length: usize,
    pub optimized_length: usize,
    pub limit: usize,
    /// 0–100; higher means closer to full budget use with keywords intact.
    pub optimization_score: u8,
    pub keywords_preserved: bool,
    /// Set when no word boundary fit and the text was cut at the limit.
    pub truncated: bool,
}

impl OptimizationResult {
    #[must_use]
    pub fn was_changed(&self) -> bool {
        self.original != self.optimized
    }
}
