//! Whole-word, case-insensitive keyword matching.

use std::collections::HashSet;

use regex::Regex;

struct CompiledKeyword {
    keyword: String,
    pattern: Regex,
    tokens: Vec<String>,
}

/// A compiled set of keywords to look for in ad copy.
///
/// A keyword matches only as whole words: `"pro"` does not match inside
/// `"SuperProduct"`. Multi-word keywords tolerate any run of whitespace
/// between their words.
pub struct KeywordMatcher {
    keywords: Vec<CompiledKeyword>,
}

impl KeywordMatcher {
    #[must_use]
    pub fn new(keywords: &[String]) -> Self {
        let keywords = keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .filter_map(|k| {
                let words: Vec<&str> = k.split_whitespace().collect();
                let body = words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join(r"\s+");
                let source = format!(r"(?i)(?:^|[^\p{{L}}\p{{N}}]){body}(?:$|[^\p{{L}}\p{{N}}])");
                match Regex::new(&source) {
                    Ok(pattern) => Some(CompiledKeyword {
                        keyword: k.trim().to_string(),
                        pattern,
                        tokens: words.iter().map(|w| normalize_token(w)).collect(),
                    }),
                    Err(e) => {
                        tracing::warn!(keyword = %k, error = %e, "skipping unmatchable keyword");
                        None
                    }
                }
            })
            .collect();
        Self { keywords }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Indices of the keywords found in `text`.
    #[must_use]
    pub fn present_in(&self, text: &str) -> Vec<usize> {
        self.keywords
            .iter()
            .enumerate()
            .filter(|(_, k)| k.pattern.is_match(text))
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn count_present(&self, text: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| k.pattern.is_match(text))
            .count()
    }

    /// Fraction of keywords found in `text`; `1.0` when there are none to find.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction_present(&self, text: &str) -> f64 {
        if self.keywords.is_empty() {
            return 1.0;
        }
        self.count_present(text) as f64 / self.keywords.len() as f64
    }

    /// Normalized word tokens belonging to the keywords at `indices`.
    #[must_use]
    pub fn tokens_of(&self, indices: &[usize]) -> HashSet<String> {
        indices
            .iter()
            .filter_map(|&i| self.keywords.get(i))
            .flat_map(|k| k.tokens.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn keyword(&self, index: usize) -> Option<&str> {
        self.keywords.get(index).map(|k| k.keyword.as_str())
    }
}

/// Lowercase a word and strip surrounding punctuation.
pub(crate) fn normalize_token(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
