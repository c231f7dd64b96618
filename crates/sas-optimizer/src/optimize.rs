use sas_core::{AdCopyKind, AdCopyUnit, OptimizationResult};

use crate::error::OptimizerError;
use crate::keywords::{normalize_token, KeywordMatcher};

/// Largest batch accepted by [`batch_optimize`].
pub const MAX_BATCH_SIZE: usize = 10;

const UTILIZATION_WEIGHT: f64 = 80.0;
const KEYWORD_WEIGHT: f64 = 20.0;
const TRUNCATION_PENALTY: f64 = 25.0;

/// Where a piece of copy may be cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundaries {
    /// Whitespace between words.
    Words,
    /// Path, host and hyphen separators inside a display URL.
    UrlSegments,
}

impl Boundaries {
    fn for_kind(kind: AdCopyKind) -> Self {
        match kind {
            AdCopyKind::Headline | AdCopyKind::Description => Boundaries::Words,
            AdCopyKind::DisplayUrl => Boundaries::UrlSegments,
        }
    }

    fn is_cut(self, c: char) -> bool {
        match self {
            Boundaries::Words => c.is_whitespace(),
            Boundaries::UrlSegments => matches!(c, '/' | '.' | '-' | '_'),
        }
    }

    /// Characters that must not be left dangling at the end of a trimmed text.
    fn is_trailing_junk(self, c: char) -> bool {
        match self {
            Boundaries::Words => {
                c.is_whitespace()
                    || matches!(c, ',' | ';' | ':' | '-' | '–' | '—' | '|' | '&' | '+' | '/')
            }
            Boundaries::UrlSegments => matches!(c, '/' | '.' | '-' | '_'),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Fit one unit of ad copy inside its character budget.
///
/// Content already within budget is returned untouched. Longer content is
/// trimmed at boundaries from the end; when that would drop keywords, a
/// keyword-aware pass removes other words instead. Only when no boundary fits
/// is the text cut at the limit, which marks the result `truncated`.
#[must_use]
pub fn optimize(unit: &AdCopyUnit) -> OptimizationResult {
    optimize_with(unit, &KeywordMatcher::new(&unit.keywords))
}

/// [`optimize`] with a prebuilt matcher, for callers that fit many texts
/// against the same keywords. The matcher replaces `unit.keywords`.
#[must_use]
pub fn optimize_with(unit: &AdCopyUnit, matcher: &KeywordMatcher) -> OptimizationResult {
    let limit = unit.effective_limit();
    let original_length = char_len(&unit.content);

    if original_length <= limit {
        let fraction = matcher.fraction_present(&unit.content);
        return OptimizationResult {
            kind: unit.kind,
            original: unit.content.clone(),
            optimized: unit.content.clone(),
            original_length,
            optimized_length: original_length,
            limit,
            optimization_score: score(unit.content.trim(), limit, fraction, false),
            keywords_preserved: true,
            truncated: false,
        };
    }

    let boundaries = Boundaries::for_kind(unit.kind);
    let content = unit.content.trim();
    let in_original = matcher.present_in(content);

    let (optimized, truncated) = if char_len(content) <= limit {
        (content.to_string(), false)
    } else {
        match best_trim(content, limit, boundaries, matcher, &in_original) {
            Some(trimmed) => (trimmed, false),
            None => (truncate_chars(content, limit), true),
        }
    };

    let in_optimized = matcher.present_in(&optimized);
    let keywords_preserved = !truncated && in_original.iter().all(|i| in_optimized.contains(i));

    if truncated {
        tracing::debug!(
            kind = %unit.kind,
            limit,
            original_length,
            "no boundary fits the budget; truncated at the limit"
        );
    } else if !keywords_preserved {
        let lost: Vec<&str> = in_original
            .iter()
            .filter(|i| !in_optimized.contains(i))
            .filter_map(|&i| matcher.keyword(i))
            .collect();
        tracing::debug!(kind = %unit.kind, ?lost, "keywords lost while trimming");
    }

    let optimization_score = score(
        &optimized,
        limit,
        matcher.fraction_present(&optimized),
        truncated,
    );

    OptimizationResult {
        kind: unit.kind,
        original: unit.content.clone(),
        optimized_length: char_len(&optimized),
        optimized,
        original_length,
        limit,
        optimization_score,
        keywords_preserved,
        truncated,
    }
}

/// Optimize up to [`MAX_BATCH_SIZE`] units independently, preserving order.
///
/// # Errors
///
/// Returns [`OptimizerError::BatchTooLarge`] when `units` holds more than
/// [`MAX_BATCH_SIZE`] entries.
pub fn batch_optimize(units: &[AdCopyUnit]) -> Result<Vec<OptimizationResult>, OptimizerError> {
    if units.len() > MAX_BATCH_SIZE {
        return Err(OptimizerError::BatchTooLarge {
            size: units.len(),
            max: MAX_BATCH_SIZE,
        });
    }
    Ok(units.iter().map(optimize).collect())
}

/// Trim free text to `limit` characters at word boundaries, cutting at the
/// limit only when a single word is longer than the budget.
///
/// Used for extension texts, which have their own limits outside the three
/// ad copy kinds.
#[must_use]
pub fn fit_to_limit(text: &str, limit: usize) -> String {
    let text = text.trim();
    if char_len(text) <= limit {
        return text.to_string();
    }
    trailing_trim(text, limit, Boundaries::Words)
        .unwrap_or_else(|| truncate_chars(text, limit))
}

/// Pick the boundary trim that keeps the most keywords.
fn best_trim(
    content: &str,
    limit: usize,
    boundaries: Boundaries,
    matcher: &KeywordMatcher,
    in_original: &[usize],
) -> Option<String> {
    let trailing = trailing_trim(content, limit, boundaries);
    let trailing_kept = trailing
        .as_deref()
        .map_or(0, |t| matcher.count_present(t));

    if trailing.is_some() && trailing_kept >= in_original.len() {
        return trailing;
    }
    if boundaries != Boundaries::Words || in_original.is_empty() {
        return trailing;
    }

    match keyword_aware_trim(content, limit, matcher, in_original) {
        Some(alternative)
            if trailing.is_none() || matcher.count_present(&alternative) > trailing_kept =>
        {
            Some(alternative)
        }
        _ => trailing,
    }
}

/// Longest prefix ending at a boundary that fits the budget.
fn trailing_trim(content: &str, limit: usize, boundaries: Boundaries) -> Option<String> {
    content
        .char_indices()
        .rev()
        .filter(|&(_, c)| boundaries.is_cut(c))
        .find_map(|(idx, _)| {
            let candidate = content[..idx].trim_end_matches(|c| boundaries.is_trailing_junk(c));
            (!candidate.is_empty() && char_len(candidate) <= limit).then(|| candidate.to_string())
        })
}

/// Drop words that belong to no present keyword, last first, until the text fits.
fn keyword_aware_trim(
    content: &str,
    limit: usize,
    matcher: &KeywordMatcher,
    in_original: &[usize],
) -> Option<String> {
    let protected = matcher.tokens_of(in_original);
    let mut words: Vec<&str> = content.split_whitespace().collect();

    loop {
        let joined = words.join(" ");
        let trimmed = joined.trim_end_matches(|c| Boundaries::Words.is_trailing_junk(c));
        if !trimmed.is_empty() && char_len(trimmed) <= limit {
            return Some(trimmed.to_string());
        }
        let removable = words
            .iter()
            .rposition(|w| !protected.contains(&normalize_token(w)))?;
        words.remove(removable);
        if words.is_empty() {
            return None;
        }
    }
}

/// First `limit` characters, without trailing whitespace.
fn truncate_chars(content: &str, limit: usize) -> String {
    let cut: String = content.chars().take(limit).collect();
    cut.trim_end().to_string()
}

/// Score budget use and keyword coverage on a 0–100 scale.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn score(text: &str, limit: usize, keyword_fraction: f64, truncated: bool) -> u8 {
    let len = char_len(text);
    if len == 0 || limit == 0 {
        return 0;
    }
    let utilization = (len as f64 / limit as f64).min(1.0);
    let mut raw = UTILIZATION_WEIGHT * utilization + KEYWORD_WEIGHT * keyword_fraction;
    if truncated {
        raw -= TRUNCATION_PENALTY;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
#[path = "optimize_test.rs"]
mod tests;
