use std::collections::HashSet;

use sas_core::{KeywordCase, KeywordEntry, MatchType, ProductValidation};

/// Product name followed by the product's own keywords, blank entries removed
/// and duplicates dropped case-insensitively (first spelling wins).
#[must_use]
pub fn base_keywords(product: &ProductValidation) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(product.product_name.as_str())
        .chain(product.keywords.iter().map(String::as_str))
        .map(|k| k.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .collect()
}

/// Emit every base keyword twice: once lowercase, once uppercase.
#[must_use]
pub fn expand_keyword_cases(
    bases: &[String],
    match_type: MatchType,
    ad_group: &str,
) -> Vec<KeywordEntry> {
    bases
        .iter()
        .flat_map(|base| {
            [
                (base.to_lowercase(), KeywordCase::Lowercase),
                (base.to_uppercase(), KeywordCase::Uppercase),
            ]
        })
        .map(|(keyword, case)| KeywordEntry {
            keyword,
            case,
            match_type,
            ad_group: ad_group.to_string(),
        })
        .collect()
}
