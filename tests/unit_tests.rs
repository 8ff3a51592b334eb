// Unit tests for Housr match

use housr_match::core::{
    extract_key_information, friendly_area_phrase, friendly_vibe_phrase, normalise_list,
    phrasing::join_natural,
    scoring::{budget_score, score_property},
    Matcher,
};
use housr_match::models::{AreaMatching, MatchWeights, Property, StudentProfile, TieBreak};
use housr_match::services::{PropertyCatalog, StaticCatalog};

fn scenario_profile() -> StudentProfile {
    StudentProfile {
        first_name: "Sam".to_string(),
        budget_min: 170,
        budget_max: 220,
        preferred_areas: vec!["fallowfield".to_string(), "city centre".to_string()],
        vibe_keywords: vec!["social".to_string(), "modern".to_string()],
        ..Default::default()
    }
}

fn create_property(code: &str, area: &str, rent: u32) -> Property {
    Property {
        code: code.to_string(),
        title: format!("Room {}", code),
        area: area.to_string(),
        weekly_rent: rent,
        distance_to_campus: "10 min walk".to_string(),
        room_type: "Studio".to_string(),
        vibe_tags: vec![],
        url: format!("https://example.com/{}", code),
        image: None,
        notes: None,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_scenario_scores_match_hand_calculation() {
    let catalog = StaticCatalog::builtin();
    let profile = scenario_profile();
    let weights = MatchWeights::default();

    let score = |code: &str| {
        let property = catalog.get(code).unwrap();
        score_property(&profile, property, &weights, AreaMatching::Graded)
    };

    assert_close(score("HSR-101"), 8.5);
    assert_close(score("HSR-204"), 3.8);
    assert_close(score("HSR-309"), 1.8);
    assert_close(score("HSR-410"), -0.6);
}

#[test]
fn test_scenario_ranking() {
    let catalog = StaticCatalog::builtin();
    let result = Matcher::default().find_matches(&scenario_profile(), catalog.properties(), 3);

    let codes: Vec<&str> = result.matches.iter().map(|m| m.property.code.as_str()).collect();
    assert_eq!(codes, vec!["HSR-101", "HSR-204", "HSR-309"]);
    assert_eq!(result.total_candidates, 4);
}

#[test]
fn test_in_budget_bonus_is_flat() {
    let profile = scenario_profile();
    let weights = MatchWeights::default();

    for rent in [170, 185, 195, 220] {
        assert_close(budget_score(&profile, rent, &weights), 4.0);
    }
}

#[test]
fn test_off_budget_penalty_is_symmetric() {
    let profile = scenario_profile();
    let weights = MatchWeights::default();

    assert_close(budget_score(&profile, 145, &weights), -1.0);
    assert_close(budget_score(&profile, 245, &weights), -1.0);
    assert!(budget_score(&profile, 300, &weights) < budget_score(&profile, 245, &weights));
}

#[test]
fn test_never_returns_fewer_than_available() {
    let matcher = Matcher::default();
    let profile = StudentProfile {
        budget_min: 50,
        budget_max: 60,
        preferred_areas: vec!["nowhere".to_string()],
        ..Default::default()
    };
    let catalog = StaticCatalog::builtin();

    for limit in 0..=6 {
        let result = matcher.find_matches(&profile, catalog.properties(), limit);
        assert_eq!(result.matches.len(), limit.min(catalog.len()));
    }
}

#[test]
fn test_tie_break_modes() {
    let profile = StudentProfile {
        budget_min: 100,
        budget_max: 300,
        ..Default::default()
    };
    let candidates = vec![
        create_property("A", "Hulme", 250),
        create_property("B", "Hulme", 150),
    ];

    let cheaper = Matcher::new(MatchWeights::default(), AreaMatching::Graded, TieBreak::CheaperFirst)
        .find_matches(&profile, &candidates, 2);
    assert_eq!(cheaper.matches[0].property.code, "B");

    let stable = Matcher::new(MatchWeights::default(), AreaMatching::Graded, TieBreak::Stable)
        .find_matches(&profile, &candidates, 2);
    assert_eq!(stable.matches[0].property.code, "A");
}

#[test]
fn test_area_matching_variants_differ() {
    let profile = StudentProfile {
        budget_min: 100,
        budget_max: 300,
        preferred_areas: vec!["fallow".to_string()],
        ..Default::default()
    };
    let property = create_property("X", "Fallowfield", 200);
    let weights = MatchWeights::default();

    assert_close(score_property(&profile, &property, &weights, AreaMatching::Graded), 5.5);
    assert_close(score_property(&profile, &property, &weights, AreaMatching::Substring), 7.0);
}

#[test]
fn test_phrase_helpers() {
    assert_eq!(friendly_area_phrase(&[]), "the main student areas");
    assert_eq!(
        friendly_area_phrase(&normalise_list("fallowfield, city centre, ancoats")),
        "Fallowfield, City Centre and Ancoats"
    );
    assert_eq!(friendly_vibe_phrase(&[]), "that feels like a good fit for you");
    assert_eq!(friendly_vibe_phrase(&["quiet".to_string()]), "with a quiet vibe");
    assert_eq!(join_natural(&["A".to_string(), "B".to_string()]), "A and B");
}

#[test]
fn test_normalise_list_drops_blanks() {
    assert_eq!(normalise_list(" Fallowfield ,, City Centre ,"), vec!["fallowfield", "city centre"]);
    assert!(normalise_list("  ").is_empty());
}

#[test]
fn test_extract_from_fallback_transcript() {
    let info = extract_key_information(
        "I'm concerned about safety in the area around Birmingham. I need a room for around \
         £170 per week, preferably close to campus. What about transport links?",
    );

    assert_eq!(info.budget, "£170/week");
    assert_eq!(info.location, "Birmingham area");
    assert_eq!(info.move_in_date, "Not specified");
    assert_eq!(info.key_concerns, vec!["Safety/security", "Transport links"]);
}
