use std::sync::LazyLock;

use regex::Regex;

use crate::models::ExtractedInfo;

const NOT_SPECIFIED: &str = "Not specified";

/// Checked in order; the first one mentioned wins
const KNOWN_LOCATIONS: [&str; 6] = [
    "manchester",
    "london",
    "birmingham",
    "fallowfield",
    "city centre",
    "campus",
];

static WEEKLY_BUDGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:£|around|about)?\s*(\d+)\s*(?:per week|week|pw|/week)")
        .expect("budget pattern")
});

/// Pull budget, location, move-in date and concerns out of a call transcript
///
/// Keyword matching only. Locations are tried in `KNOWN_LOCATIONS` order and
/// each concern is reported at most once.
pub fn extract_key_information(transcript: &str) -> ExtractedInfo {
    let text = transcript.to_lowercase();

    let budget = WEEKLY_BUDGET
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|amount| format!("£{}/week", amount.as_str()))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let location = KNOWN_LOCATIONS
        .iter()
        .find(|loc| text.contains(*loc))
        .map(|loc| format!("{} area", capitalise_first(loc)))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let move_in_date = if text.contains("september") {
        "September".to_string()
    } else if text.contains("move in") {
        "ASAP".to_string()
    } else {
        NOT_SPECIFIED.to_string()
    };

    let mut key_concerns = Vec::new();
    if text.contains("safety") || text.contains("security") {
        key_concerns.push("Safety/security".to_string());
    }
    if text.contains("bills") {
        key_concerns.push("Bills included".to_string());
    }
    if ["transport", "bus", "tram"].iter().any(|w| text.contains(w)) {
        key_concerns.push("Transport links".to_string());
    }
    if key_concerns.is_empty() {
        key_concerns.push("General inquiry".to_string());
    }

    ExtractedInfo {
        budget,
        location,
        move_in_date,
        key_concerns,
    }
}

/// Upper-case only the first character ("city centre" -> "City centre")
fn capitalise_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
