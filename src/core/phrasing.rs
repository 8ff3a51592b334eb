/// Split comma-separated form input into trimmed, lowercase entries
pub fn normalise_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Normalise entries that already arrived as a list
pub fn normalise_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Capitalise the first letter of every word
///
/// A word starts after any non-alphanumeric character, so "city-centre"
/// becomes "City-Centre".
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    out
}

/// Join items as "A", "A and B" or "A, B and C"
pub fn join_natural(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Human-readable list of the areas a student asked for
pub fn friendly_area_phrase(preferred_areas: &[String]) -> String {
    if preferred_areas.is_empty() {
        return "the main student areas".to_string();
    }

    let titled: Vec<String> = preferred_areas.iter().map(|a| title_case(a)).collect();
    join_natural(&titled)
}

/// Describe the requested vibe as a trailing clause
pub fn friendly_vibe_phrase(vibes: &[String]) -> String {
    if vibes.is_empty() {
        return "that feels like a good fit for you".to_string();
    }

    format!("with a {} vibe", join_natural(vibes))
}
