use crate::core::scoring::score_property;
use crate::models::{AreaMatching, MatchWeights, Property, ScoredProperty, StudentProfile, TieBreak};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredProperty>,
    pub total_candidates: usize,
}

/// Ranks catalog properties for a student profile
///
/// Every candidate is scored and the best `limit` are returned. There is no
/// minimum-score cutoff: something is always recommended while the catalog
/// is non-empty.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    weights: MatchWeights,
    area_matching: AreaMatching,
    tie_break: TieBreak,
}

impl Matcher {
    pub fn new(weights: MatchWeights, area_matching: AreaMatching, tie_break: TieBreak) -> Self {
        Self {
            weights,
            area_matching,
            tie_break,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(MatchWeights::default(), AreaMatching::default(), TieBreak::default())
    }

    /// Same scoring, different area comparison
    pub fn with_area_matching(mut self, area_matching: AreaMatching) -> Self {
        self.area_matching = area_matching;
        self
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn area_matching(&self) -> AreaMatching {
        self.area_matching
    }

    /// Score every candidate and keep the top `limit`
    ///
    /// Sorted by score (descending); ties are broken by ascending rent under
    /// `TieBreak::CheaperFirst` and left in catalog order under `TieBreak::Stable`.
    pub fn find_matches(
        &self,
        profile: &StudentProfile,
        candidates: &[Property],
        limit: usize,
    ) -> MatchResult {
        let mut scored: Vec<ScoredProperty> = candidates
            .iter()
            .map(|property| {
                let score = score_property(profile, property, &self.weights, self.area_matching);
                tracing::debug!("Scored {} at {:.2}", property.code, score);
                ScoredProperty {
                    property: property.clone(),
                    score,
                }
            })
            .collect();

        // sort_by is stable, so Stable keeps catalog order for equal scores
        scored.sort_by(|a, b| {
            let by_score = b
                .score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal);

            match self.tie_break {
                TieBreak::CheaperFirst => by_score
                    .then_with(|| a.property.weekly_rent.cmp(&b.property.weekly_rent)),
                TieBreak::Stable => by_score,
            }
        });

        scored.truncate(limit);

        MatchResult {
            matches: scored,
            total_candidates: candidates.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(code: &str, area: &str, rent: u32, tags: &[&str]) -> Property {
        Property {
            code: code.to_string(),
            title: format!("Room {}", code),
            area: area.to_string(),
            weekly_rent: rent,
            distance_to_campus: "10 min walk".to_string(),
            room_type: "Ensuite".to_string(),
            vibe_tags: tags.iter().map(|s| s.to_string()).collect(),
            url: format!("https://example.com/{}", code),
            image: None,
            notes: None,
        }
    }

    fn create_profile() -> StudentProfile {
        StudentProfile {
            budget_min: 150,
            budget_max: 200,
            preferred_areas: vec!["fallowfield".to_string()],
            vibe_keywords: vec!["quiet".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("A", "Rusholme", 300, &[]),
            create_candidate("B", "Fallowfield", 180, &["quiet"]),
            create_candidate("C", "Fallowfield", 260, &[]),
        ];

        let result = matcher.find_matches(&create_profile(), &candidates, 10);

        let codes: Vec<&str> = result.matches.iter().map(|m| m.property.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "C", "A"]);
        assert_eq!(result.total_candidates, 3);
    }

    #[test]
    fn test_cheaper_first_tie_break() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("PRICEY", "Fallowfield", 195, &[]),
            create_candidate("CHEAP", "Fallowfield", 155, &[]),
        ];

        let result = matcher.find_matches(&create_profile(), &candidates, 2);

        assert_eq!(result.matches[0].property.code, "CHEAP");
        assert_eq!(result.matches[0].score, result.matches[1].score);
    }

    #[test]
    fn test_stable_tie_break_keeps_catalog_order() {
        let matcher = Matcher::new(MatchWeights::default(), AreaMatching::Graded, TieBreak::Stable);
        let candidates = vec![
            create_candidate("PRICEY", "Fallowfield", 195, &[]),
            create_candidate("CHEAP", "Fallowfield", 155, &[]),
        ];

        let result = matcher.find_matches(&create_profile(), &candidates, 2);

        assert_eq!(result.matches[0].property.code, "PRICEY");
    }

    #[test]
    fn test_negative_scores_still_returned() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("FAR", "Salford", 900, &[]),
            create_candidate("FARTHER", "Bolton", 1200, &[]),
        ];

        let result = matcher.find_matches(&create_profile(), &candidates, 3);

        assert_eq!(result.matches.len(), 2);
        assert!(result.matches.iter().all(|m| m.score < 0.0));
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let candidates: Vec<Property> = (0..20)
            .map(|i| create_candidate(&i.to_string(), "Fallowfield", 150 + i, &[]))
            .collect();

        let result = matcher.find_matches(&create_profile(), &candidates, 5);

        assert_eq!(result.matches.len(), 5);
    }
}
