use super::*;

fn headline(content: &str, keywords: &[&str]) -> AdCopyUnit {
    AdCopyUnit::new(AdCopyKind::Headline, content).with_keywords(keywords.iter().copied())
}

// -----------------------------------------------------------------------
// optimize
// -----------------------------------------------------------------------

#[test]
fn within_budget_is_returned_unchanged() {
    let unit = headline("Buy Now", &[]);
    let result = optimize(&unit);
    assert_eq!(result.optimized, "Buy Now");
    assert!(!result.was_changed());
    assert!(result.keywords_preserved);
    assert!(!result.truncated);
    assert_eq!(result.original_length, 7);
    assert_eq!(result.optimized_length, 7);
    // 80 * 7/30 + 20 = 38.67
    assert_eq!(result.optimization_score, 39);
}

#[test]
fn within_budget_keeps_surrounding_whitespace() {
    let unit = headline("  Buy SuperProduct Now  ", &["SuperProduct"]);
    let result = optimize(&unit);
    assert_eq!(result.optimized, "  Buy SuperProduct Now  ");
}

#[test]
fn empty_content_scores_zero() {
    let result = optimize(&headline("", &["anything"]));
    assert_eq!(result.optimized, "");
    assert_eq!(result.optimization_score, 0);
    assert!(!result.truncated);

    let blank = optimize(&headline("    ", &[]));
    assert_eq!(blank.optimization_score, 0);
}

#[test]
fn trims_at_word_boundaries_and_keeps_keyword() {
    let unit = headline(
        "Buy SuperProduct Now With Free Shipping Today",
        &["SuperProduct"],
    )
    .with_limit(30);
    let result = optimize(&unit);
    assert_eq!(result.optimized, "Buy SuperProduct Now With Free");
    assert!(result.optimized.chars().count() <= 30);
    assert!(result.optimized.contains("SuperProduct"));
    assert!(result.keywords_preserved);
    assert!(!result.truncated);
    assert_eq!(result.optimization_score, 100);
}

#[test]
fn keyword_aware_pass_drops_other_words_first() {
    let unit = headline(
        "Get Amazing Results Fast With SuperProduct",
        &["SuperProduct"],
    );
    let result = optimize(&unit);
    assert_eq!(result.optimized, "Get Amazing SuperProduct");
    assert!(result.keywords_preserved);
}

#[test]
fn trailing_trim_wins_when_no_keyword_is_at_stake() {
    let unit = headline(
        "Get Amazing Results Fast With SuperProduct",
        &["Miracle"],
    );
    let result = optimize(&unit);
    assert_eq!(result.optimized, "Get Amazing Results Fast With");
    assert!(result.keywords_preserved);
}

#[test]
fn dangling_separators_are_removed() {
    let unit = headline("Fast Relief - Order Your Bottle Today", &[]).with_limit(15);
    let result = optimize(&unit);
    assert_eq!(result.optimized, "Fast Relief");
}

#[test]
fn over_budget_padding_is_trimmed_before_cutting_words() {
    let padded = format!("Buy Now{}", " ".repeat(30));
    let result = optimize(&headline(&padded, &[]));
    assert_eq!(result.optimized, "Buy Now");
    assert!(!result.truncated);
}

#[test]
fn single_oversized_word_is_truncated_and_flagged() {
    let word = "Supercalifragilisticexpialidocious";
    let result = optimize(&headline(word, &[]));
    assert!(result.truncated);
    assert!(!result.keywords_preserved);
    assert_eq!(result.optimized.chars().count(), 30);
    assert_eq!(result.optimized, &word[..30]);
    // 80 + 20 (no keywords) - 25
    assert_eq!(result.optimization_score, 75);
}

#[test]
fn truncating_through_a_keyword_is_penalized_further() {
    let word = "Supercalifragilisticexpialidocious";
    let with_keyword = optimize(&headline(word, &[word]));
    let without_keyword = optimize(&headline(word, &[]));
    assert!(with_keyword.truncated);
    // 80 + 0 - 25
    assert_eq!(with_keyword.optimization_score, 55);
    assert!(with_keyword.optimization_score < without_keyword.optimization_score);
}

#[test]
fn display_url_trims_at_url_separators() {
    let unit = AdCopyUnit::new(AdCopyKind::DisplayUrl, "skinatrin-official.com");
    let result = optimize(&unit);
    assert_eq!(result.limit, 15);
    assert_eq!(result.optimized, "skinatrin");
    assert!(!result.truncated);
}

#[test]
fn display_url_path_segments_are_dropped_from_the_end() {
    let unit = AdCopyUnit::new(AdCopyKind::DisplayUrl, "shop.io/offers/today");
    let result = optimize(&unit);
    assert_eq!(result.optimized, "shop.io/offers");
}

#[test]
fn description_uses_ninety_character_budget() {
    let text = "Clinically tested formula that supports healthy skin from within. \
                Order today and enjoy free worldwide shipping on every bottle.";
    let unit = AdCopyUnit::new(AdCopyKind::Description, text);
    let result = optimize(&unit);
    assert_eq!(result.limit, 90);
    assert!(result.optimized.chars().count() <= 90);
    assert!(text.starts_with(&result.optimized));
    assert!(!result.truncated);
}

#[test]
fn multibyte_text_is_counted_in_characters() {
    let unit = headline("Qualità Garantita Già Oggi Con Spedizione Gratuita", &[]);
    let result = optimize(&unit);
    assert!(result.optimized.chars().count() <= 30);
    assert_eq!(result.optimized, "Qualità Garantita Già Oggi Con");
}

#[test]
fn result_never_exceeds_limit() {
    let samples = [
        "A",
        "Two Words",
        "One Two Three Four Five Six Seven Eight Nine Ten Eleven",
        "Averyveryveryverylongsingletokenwithoutanyspacesatall and more",
        "   leading and trailing spaces that push us over budget    ",
        "x y z x y z x y z x y z x y z x y z x y z x y z x y z x y z",
    ];
    for kind in [
        AdCopyKind::Headline,
        AdCopyKind::Description,
        AdCopyKind::DisplayUrl,
    ] {
        for sample in samples {
            let unit = AdCopyUnit::new(kind, sample).with_keywords(["two", "eleven"]);
            let result = optimize(&unit);
            assert!(
                result.optimized.chars().count() <= unit.effective_limit(),
                "{kind} {sample:?} -> {:?}",
                result.optimized
            );
        }
    }
}

#[test]
fn optimizing_twice_changes_nothing() {
    let samples = [
        "Buy SuperProduct Now With Free Shipping Today",
        "Get Amazing Results Fast With SuperProduct",
        "Supercalifragilisticexpialidocious",
        "Fast Relief - Order Your Bottle Today",
    ];
    for sample in samples {
        let first = optimize(&headline(sample, &["SuperProduct"]));
        let again = AdCopyUnit::new(AdCopyKind::Headline, first.optimized.clone())
            .with_keywords(["SuperProduct"])
            .with_limit(first.limit);
        let second = optimize(&again);
        assert_eq!(second.optimized, first.optimized, "sample {sample:?}");
        assert!(!second.was_changed());
    }
}

#[test]
fn score_rises_with_budget_use() {
    let short = optimize(&headline("Buy", &[]));
    let longer = optimize(&headline("Buy The Original Today", &[]));
    assert!(longer.optimization_score > short.optimization_score);
}

#[test]
fn score_rises_with_keyword_coverage() {
    let missing = optimize(&headline("Order The Original Today", &["Skinatrin"]));
    let present = optimize(&headline("Order Skinatrin Original", &["Skinatrin"]));
    assert!(present.optimization_score > missing.optimization_score);
}

// -----------------------------------------------------------------------
// batch_optimize
// -----------------------------------------------------------------------

#[test]
fn batch_of_ten_succeeds_in_order() {
    let units: Vec<AdCopyUnit> = (0..10)
        .map(|i| headline(&format!("Headline number {i}"), &[]))
        .collect();
    let results = batch_optimize(&units).expect("ten units fit in a batch");
    assert_eq!(results.len(), 10);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.original, format!("Headline number {i}"));
    }
}

#[test]
fn batch_of_eleven_is_rejected() {
    let units: Vec<AdCopyUnit> = (0..11).map(|_| headline("Too many", &[])).collect();
    let err = batch_optimize(&units).unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::BatchTooLarge { size: 11, max: 10 }
    ));
}

#[test]
fn empty_batch_is_fine() {
    assert!(batch_optimize(&[]).unwrap().is_empty());
}

#[test]
fn batch_results_match_individual_results() {
    let units = vec![
        headline("Buy SuperProduct Now With Free Shipping Today", &["SuperProduct"]),
        AdCopyUnit::new(AdCopyKind::DisplayUrl, "skinatrin-official.com"),
    ];
    let batch = batch_optimize(&units).unwrap();
    let single: Vec<_> = units.iter().map(optimize).collect();
    assert_eq!(batch, single);
}

// -----------------------------------------------------------------------
// fit_to_limit
// -----------------------------------------------------------------------

#[test]
fn fit_to_limit_trims_words() {
    assert_eq!(
        fit_to_limit("Free Shipping On All Orders", 25),
        "Free Shipping On All"
    );
}

#[test]
fn fit_to_limit_leaves_short_text() {
    assert_eq!(fit_to_limit("  Official Store ", 25), "Official Store");
}

#[test]
fn fit_to_limit_cuts_unbreakable_text() {
    let fitted = fit_to_limit("Antiinflammatorisch-wirksame", 25);
    assert_eq!(fitted.chars().count(), 25);
}

// -----------------------------------------------------------------------
// optimize_with
// -----------------------------------------------------------------------

#[test]
fn shared_matcher_gives_same_results_as_per_unit_matching() {
    let keywords = ["skinatrin".to_string(), "skin care".to_string()];
    let matcher = KeywordMatcher::new(&keywords);
    for (kind, content) in [
        (AdCopyKind::Headline, "Skinatrin Official Site"),
        (AdCopyKind::Headline, "The Best Natural Skin Care Formula By Skinatrin Labs"),
        (
            AdCopyKind::Description,
            "Skinatrin is a gentle skin care routine made from natural ingredients. \
             Order today and see the difference in two weeks or your money back.",
        ),
        (AdCopyKind::DisplayUrl, "shop.skinatrin-official.example.com/offer"),
    ] {
        let bare = AdCopyUnit::new(kind, content);
        let with_keywords = bare.clone().with_keywords(keywords.iter());
        assert_eq!(
            optimize_with(&bare, &matcher),
            optimize(&with_keywords),
            "{content}"
        );
    }
}

#[test]
fn shared_matcher_takes_precedence_over_unit_keywords() {
    let matcher = KeywordMatcher::new(&["support".to_string()]);
    let unit = headline("Round The Clock Customer Support And Fast Refunds", &["refunds"]);
    let result = optimize_with(&unit, &matcher);
    assert!(result.optimized.contains("Support"));
    assert!(result.keywords_preserved);
}
