use super::*;
use crate::test_support::{at_distance, enriched, suburb, KILBURN};

fn salisbury_catalogue(populations: [Option<u32>; 3]) -> Catalogue {
    Catalogue::from_suburbs(vec![
        suburb(1, "Salisbury North", -34.7500, 138.6200, populations[1]),
        suburb(2, "Salisbury", -34.7600, 138.6400, populations[0]),
        suburb(3, "Salisbury East", -34.7700, 138.6600, populations[2]),
        suburb(4, "Elizabeth", -34.7200, 138.6700, Some(9000)),
        suburb(5, "Prospect", -34.8833, 138.5945, Some(21000)),
    ])
    .unwrap()
}

#[test]
fn name_matches_exact_and_case_insensitive() {
    assert!(name_matches("Salisbury", "Salisbury"));
    assert!(name_matches("  salisbury ", "SALISBURY"));
}

#[test]
fn name_matches_prefix_word_and_suffix_word() {
    assert!(name_matches("Salisbury", "Salisbury North"));
    assert!(name_matches("Park", "Hyde Park"));
    assert!(name_matches("Beach", "Henley Beach South"));
}

#[test]
fn name_matches_bare_prefix_over_matches() {
    assert!(name_matches("Pro", "Prospect"));
}

#[test]
fn name_matches_rejects_unrelated_and_blank() {
    assert!(!name_matches("Salisbury", "Elizabeth"));
    assert!(!name_matches("bury", "Salisbury"));
    assert!(!name_matches("   ", "Salisbury"));
}

#[test]
fn match_quality_scores() {
    assert_eq!(MatchQuality::of("Salisbury", "salisbury").score(), 100);
    assert_eq!(MatchQuality::of("Salisbury", "Salisbury North").score(), 50);
    assert_eq!(MatchQuality::of("Park", "Hyde Park").score(), 25);
}

#[test]
fn salisbury_matches_all_three_variations() {
    let catalogue = salisbury_catalogue([None, None, None]);
    let mut names: Vec<&str> = catalogue
        .matches_for("Salisbury")
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["Salisbury", "Salisbury East", "Salisbury North"]);
}

#[test]
fn best_match_prefers_exact_name_on_equal_population() {
    let catalogue = salisbury_catalogue([Some(5000), Some(5000), Some(5000)]);
    let candidates: Vec<EnrichedSuburb> = catalogue
        .matches_for("Salisbury")
        .into_iter()
        .map(enriched)
        .collect();
    let best = select_best_match("Salisbury", &candidates).unwrap();
    assert_eq!(best.name(), "Salisbury");
}

#[test]
fn best_match_prefers_population_data_over_exact_name() {
    let catalogue = salisbury_catalogue([None, Some(3000), None]);
    let candidates: Vec<EnrichedSuburb> = catalogue
        .matches_for("Salisbury")
        .into_iter()
        .map(enriched)
        .collect();
    let best = select_best_match("Salisbury", &candidates).unwrap();
    assert_eq!(best.name(), "Salisbury North");
}

#[test]
fn best_match_prefers_larger_population() {
    let catalogue = salisbury_catalogue([Some(2000), Some(3000), Some(8000)]);
    let candidates: Vec<EnrichedSuburb> = catalogue
        .matches_for("Salisbury")
        .into_iter()
        .map(enriched)
        .collect();
    let best = select_best_match("Salisbury", &candidates).unwrap();
    assert_eq!(best.name(), "Salisbury East");
}

#[test]
fn best_match_treats_parenthetical_qualifier_as_exact_base_name() {
    let candidates = vec![
        at_distance(1, "Prospect Hill", 2.0, None),
        at_distance(2, "Prospect (SA)", 9.0, None),
    ];
    let best = select_best_match("Prospect", &candidates).unwrap();
    assert_eq!(best.id(), 2);
}

#[test]
fn best_match_falls_back_to_distance_then_name() {
    let candidates = vec![
        at_distance(1, "Hyde Park", 12.0, None),
        at_distance(2, "Hazelwood Park", 4.0, None),
        at_distance(3, "Heathpool Park", 4.0, None),
    ];
    let best = select_best_match("Park", &candidates).unwrap();
    assert_eq!(best.name(), "Hazelwood Park");
}

#[test]
fn best_match_with_no_candidates_is_an_error() {
    let err = select_best_match("Salisbury", &[]).unwrap_err();
    assert!(matches!(err, SuburbError::EmptyCandidates));
}

#[test]
fn process_best_match_keeps_term_order() {
    let catalogue = salisbury_catalogue([Some(5000), Some(5000), Some(5000)]);
    let resolved = process_featured_suburbs(
        &["Prospect", "Salisbury", "Elizabeth"],
        &catalogue,
        KILBURN,
        SelectionMode::BestMatch,
    )
    .unwrap();
    let names: Vec<&str> = resolved.iter().map(EnrichedSuburb::name).collect();
    assert_eq!(names, ["Prospect", "Salisbury", "Elizabeth"]);
}

#[test]
fn process_all_variations_keeps_every_match_once() {
    let catalogue = salisbury_catalogue([None, None, None]);
    let resolved = process_featured_suburbs(
        &["Salisbury", "Salisbury North"],
        &catalogue,
        KILBURN,
        SelectionMode::AllVariations,
    )
    .unwrap();
    let ids: Vec<u32> = resolved.iter().map(EnrichedSuburb::id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[test]
fn process_skips_unmatched_and_blank_terms() {
    let catalogue = salisbury_catalogue([None, None, None]);
    let resolved = process_featured_suburbs(
        &["Atlantis", " ", "Elizabeth"],
        &catalogue,
        KILBURN,
        SelectionMode::BestMatch,
    )
    .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].name(), "Elizabeth");
}

#[test]
fn process_attaches_distance_from_center() {
    let catalogue = salisbury_catalogue([None, None, None]);
    let resolved =
        process_featured_suburbs(&["Prospect"], &catalogue, KILBURN, SelectionMode::BestMatch)
            .unwrap();
    assert!((3.0..4.5).contains(&resolved[0].distance_km));
}
