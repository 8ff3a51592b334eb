use std::collections::HashSet;
use crate::models::{AreaMatching, MatchWeights, Property, StudentProfile};

/// Score a property against a student's preferences
///
/// Scoring formula (purely additive, unbounded):
/// score = budget_term + area_term + vibe_term
///
/// - budget_term: `+budget_bonus` inside the range, otherwise
///   `-|rent - mid| / budget_penalty_divisor`
/// - area_term: see [`area_score`]
/// - vibe_term: shared vibe keywords * `vibe_match`, see [`vibe_hits`]
///
/// Off-budget properties are deprioritised, never excluded.
pub fn score_property(
    profile: &StudentProfile,
    property: &Property,
    weights: &MatchWeights,
    area_matching: AreaMatching,
) -> f64 {
    let budget = budget_score(profile, property.weekly_rent, weights);
    let area = area_score(&profile.preferred_areas, &property.area, weights, area_matching);
    let vibe = vibe_hits(&profile.vibe_keywords, &property.vibe_tags, area_matching) as f64
        * weights.vibe_match;

    budget + area + vibe
}

/// Budget contribution
#[inline]
pub fn budget_score(profile: &StudentProfile, weekly_rent: u32, weights: &MatchWeights) -> f64 {
    if profile.within_budget(weekly_rent) {
        return weights.budget_bonus;
    }

    let diff = (weekly_rent as f64 - profile.budget_mid()).abs();
    -(diff / weights.budget_penalty_divisor)
}

/// Area contribution
///
/// `Graded`: no preferred areas scores nothing; an exact (case-insensitive)
/// match scores `area_exact`; otherwise the first preferred area where either
/// string contains the other scores `area_partial`.
///
/// `Substring`: `area_exact` when the property area contains any preferred
/// area, stopping at the first hit.
pub fn area_score(
    preferred_areas: &[String],
    property_area: &str,
    weights: &MatchWeights,
    area_matching: AreaMatching,
) -> f64 {
    let area_lower = property_area.to_lowercase();

    match area_matching {
        AreaMatching::Graded => {
            if preferred_areas.is_empty() {
                return 0.0;
            }
            if is_exact_area(preferred_areas, &area_lower) {
                weights.area_exact
            } else if preferred_areas
                .iter()
                .any(|a| area_lower.contains(a.as_str()) || a.contains(area_lower.as_str()))
            {
                weights.area_partial
            } else {
                0.0
            }
        }
        AreaMatching::Substring => {
            if preferred_areas
                .iter()
                .any(|a| area_lower.contains(a.as_str()))
            {
                weights.area_exact
            } else {
                0.0
            }
        }
    }
}

/// Whether any preferred area names the property's area exactly
pub fn is_exact_area(preferred_areas: &[String], area_lower: &str) -> bool {
    preferred_areas.iter().any(|a| a.as_str() == area_lower)
}

/// Distinct profile keywords found in the property's tags, in request order
///
/// Exact token comparison after lowercasing; no stemming.
pub fn vibe_overlap(keywords: &[String], tags: &[String]) -> Vec<String> {
    let tag_set: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let mut seen = HashSet::new();

    keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| tag_set.contains(k) && seen.insert(k.clone()))
        .collect()
}

/// Number of profile keywords found in the property's tags
///
/// `Graded` counts each distinct keyword once. `Substring` counts every
/// keyword as listed, so a repeated keyword scores again.
pub fn vibe_hits(keywords: &[String], tags: &[String], area_matching: AreaMatching) -> usize {
    match area_matching {
        AreaMatching::Graded => vibe_overlap(keywords, tags).len(),
        AreaMatching::Substring => {
            let tag_set: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
            keywords
                .iter()
                .filter(|k| tag_set.contains(&k.to_lowercase()))
                .count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_profile(min: u32, max: u32, areas: &[&str], vibes: &[&str]) -> StudentProfile {
        StudentProfile {
            budget_min: min,
            budget_max: max,
            preferred_areas: areas.iter().map(|s| s.to_string()).collect(),
            vibe_keywords: vibes.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn create_property(area: &str, rent: u32, tags: &[&str]) -> Property {
        Property {
            code: "TEST-1".to_string(),
            title: "Test Room".to_string(),
            area: area.to_string(),
            weekly_rent: rent,
            distance_to_campus: "5 min walk".to_string(),
            room_type: "Studio".to_string(),
            vibe_tags: tags.iter().map(|s| s.to_string()).collect(),
            url: "https://example.com/test".to_string(),
            image: None,
            notes: None,
        }
    }

    #[test]
    fn test_budget_bonus_is_flat_inside_range() {
        let weights = MatchWeights::default();
        let profile = create_profile(100, 300, &[], &[]);

        assert_eq!(budget_score(&profile, 100, &weights), 4.0);
        assert_eq!(budget_score(&profile, 200, &weights), 4.0);
        assert_eq!(budget_score(&profile, 300, &weights), 4.0);
    }

    #[test]
    fn test_budget_penalty_from_midpoint() {
        let weights = MatchWeights::default();
        let profile = create_profile(170, 220, &[], &[]);

        // mid = 195
        assert_eq!(budget_score(&profile, 295, &weights), -2.0);
        assert_eq!(budget_score(&profile, 145, &weights), -1.0);
    }

    #[test]
    fn test_graded_area_matching() {
        let weights = MatchWeights::default();
        let areas = vec!["city centre".to_string(), "fallow".to_string()];

        assert_eq!(area_score(&areas, "City Centre", &weights, AreaMatching::Graded), 3.0);
        assert_eq!(area_score(&areas, "Fallowfield", &weights, AreaMatching::Graded), 1.5);
        // preferred area containing the property area also counts
        let wide = vec!["greater ancoats".to_string()];
        assert_eq!(area_score(&wide, "Ancoats", &weights, AreaMatching::Graded), 1.5);
        assert_eq!(area_score(&areas, "Rusholme", &weights, AreaMatching::Graded), 0.0);
        assert_eq!(area_score(&[], "Rusholme", &weights, AreaMatching::Graded), 0.0);
    }

    #[test]
    fn test_substring_area_matching() {
        let weights = MatchWeights::default();
        let areas = vec!["fallow".to_string()];

        assert_eq!(area_score(&areas, "Fallowfield", &weights, AreaMatching::Substring), 3.0);
        let wide = vec!["greater ancoats".to_string()];
        assert_eq!(area_score(&wide, "Ancoats", &weights, AreaMatching::Substring), 0.0);
    }

    #[test]
    fn test_vibe_overlap_counts_distinct_keywords() {
        let keywords = vec!["social".to_string(), "Social".to_string(), "quiet".to_string()];
        let tags = vec!["SOCIAL".to_string(), "modern".to_string()];

        assert_eq!(vibe_overlap(&keywords, &tags), vec!["social"]);
    }

    #[test]
    fn test_score_property_sums_terms() {
        let weights = MatchWeights::default();
        let profile = create_profile(170, 220, &["fallowfield"], &["social", "lively"]);
        let property = create_property("Fallowfield", 185, &["social", "lively", "student"]);

        let score = score_property(&profile, &property, &weights, AreaMatching::Graded);
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_vibe_keyword_scores_again_under_substring() {
        let weights = MatchWeights::default();
        let profile = create_profile(150, 250, &[], &["social", "social"]);
        let property = create_property("Fallowfield", 200, &["social"]);

        let graded = score_property(&profile, &property, &weights, AreaMatching::Graded);
        let substring = score_property(&profile, &property, &weights, AreaMatching::Substring);

        assert!((graded - 5.5).abs() < 1e-9);
        assert!((substring - 7.0).abs() < 1e-9);
    }
}
