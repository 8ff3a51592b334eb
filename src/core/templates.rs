use std::sync::LazyLock;

use regex::Regex;

use crate::core::phrasing::{friendly_area_phrase, friendly_vibe_phrase, join_natural};
use crate::core::scoring::{is_exact_area, vibe_overlap};
use crate::models::{CallFollowup, EmailDraft, ExtractedInfo, Platform, Property, StudentProfile, Tone};

/// Greeting and sign-off for a tone
fn tone_pair(tone: Tone, name: &str) -> (String, &'static str) {
    match tone {
        Tone::Hype => (format!("Hey {}! 👋", name), "Cheers,\nHousr Team 🚀"),
        Tone::Professional => (format!("Dear {},", name), "Kind regards,\nHousr Lettings"),
        Tone::Friendly | Tone::Concise => (format!("Hi {},", name), "Best,\nThe Housr Team"),
    }
}

/// Reply-engine message for email or WhatsApp
pub fn generate_content<P: AsRef<Property>>(
    profile: &StudentProfile,
    properties: &[P],
    tone: Tone,
    platform: Platform,
) -> String {
    let (greeting, signoff) = tone_pair(tone, profile.display_name());
    let area_phrase = friendly_area_phrase(&profile.preferred_areas);

    if properties.is_empty() {
        return format!(
            "{}\n\nThanks for reaching out. We're currently looking for properties that match your \
             specific criteria around {}. I'll be in touch as soon as something comes up!\n\n{}",
            greeting, area_phrase, signoff
        );
    }

    let matches = properties
        .iter()
        .map(AsRef::<Property>::as_ref)
        .enumerate()
        .map(|(i, p)| match platform {
            Platform::WhatsApp => format!(
                "🏠 *{}* ({})\n💰 £{}/wk | {}\n🔗 {}",
                p.title, p.area, p.weekly_rent, p.distance_to_campus, p.url
            ),
            Platform::Email => format!(
                "{}. **{}** in {}\n   - Rent: £{}/week (Bills inc.)\n   - Vibe: {}\n   - Distance: {}\n   - Link: {}",
                i + 1,
                p.title,
                p.area,
                p.weekly_rent,
                p.vibe_tags.join(", "),
                p.distance_to_campus,
                p.url
            ),
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    match platform {
        Platform::WhatsApp => format!(
            "{} Found some spots for you! 👇\n\n{}\n\nLet me know if you want to view any! 🔑",
            greeting, matches
        ),
        Platform::Email => format!(
            "Subject: Your Housing Matches 🏡\n\n{}\n\nThanks for sharing your preferences! Based on \
             your budget of £{}-£{} and interest in {}, I've found these perfect matches:\n\n{}\n\n\
             Would you like to book a viewing for any of these?\n\n{}",
            greeting, profile.budget_min, profile.budget_max, area_phrase, matches, signoff
        ),
    }
}

/// Explain why a property was picked for this student
pub fn build_property_reason(profile: &StudentProfile, property: &Property) -> String {
    let mut reasons: Vec<String> = Vec::new();
    let rent = property.weekly_rent;

    if profile.within_budget(rent) {
        reasons.push(format!(
            "It sits comfortably in your budget at around £{} per week.",
            rent
        ));
    } else if rent < profile.budget_min {
        reasons.push(format!(
            "It's actually a bit under your stated budget at about £{} per week, which gives you \
             some extra breathing room.",
            rent
        ));
    } else {
        reasons.push(format!(
            "It's slightly above the top of your range at about £{} per week, but I wanted to \
             include it because it ticks a lot of your boxes.",
            rent
        ));
    }

    if !profile.preferred_areas.is_empty() {
        if is_exact_area(&profile.preferred_areas, &property.area.to_lowercase()) {
            reasons.push(format!(
                "It's in {}, which you mentioned as one of your preferred areas.",
                property.area
            ));
        } else {
            reasons.push(format!(
                "It's in {}, which is similar to the areas you mentioned.",
                property.area
            ));
        }
    }

    let overlap = vibe_overlap(&profile.vibe_keywords, &property.vibe_tags);
    if overlap.is_empty() {
        reasons.push(
            "From what we see, the building vibe should be a good match for how you like to live \
             and study."
                .to_string(),
        );
    } else {
        reasons.push(format!(
            "The building has a {} feel, which matches what you described.",
            overlap.join(", ")
        ));
    }

    if !property.distance_to_campus.is_empty() {
        reasons.push(format!("{}.", property.distance_to_campus));
    }

    if let Some(notes) = property.notes.as_deref().filter(|n| !n.is_empty()) {
        reasons.push(notes.to_string());
    }

    reasons.join(" ")
}

fn move_in_clause(profile: &StudentProfile) -> String {
    if profile.move_in_date.is_empty() {
        String::new()
    } else {
        format!(" from about {}", profile.move_in_date)
    }
}

/// Student-summary follow-up email
pub fn build_email<P: AsRef<Property>>(profile: &StudentProfile, properties: &[P]) -> String {
    let area_phrase = friendly_area_phrase(&profile.preferred_areas);
    let name = profile.display_name();

    if properties.is_empty() {
        return format!(
            "Subject: Your Housr housing search in {area}\n\n\
             Hi {name},\n\n\
             Thanks again for chatting with us about housing! We don't have anything that matches \
             your criteria around {area} right now, but new rooms and studios come up all the time \
             and I'll be in touch as soon as something does.\n\n\
             Best,\nThe Housr Team",
            area = area_phrase,
            name = name
        );
    }

    let vibe_phrase = friendly_vibe_phrase(&profile.vibe_keywords);
    let mut body = format!(
        "Hi {},\n\nThanks again for chatting with us about housing! Based on what you told me – a \
         budget of roughly £{}–£{} per week, looking around {}{}, and a place {} – I've pulled \
         together a few options that I think could work well for you.\n",
        name,
        profile.budget_min,
        profile.budget_max,
        area_phrase,
        move_in_clause(profile),
        vibe_phrase
    );

    if !profile.notes.is_empty() {
        body.push_str(&format!("\nQuick recap from the call: {}\n", profile.notes));
    }

    body.push_str("\nHere are your matches:\n");

    for (index, property) in properties.iter().map(AsRef::<Property>::as_ref).enumerate() {
        body.push_str(&format!(
            "\n{}) {} – {} – approx. £{}/week\n   Type: {}\n   Link: {}\n   Why it fits: {}\n",
            index + 1,
            property.title,
            property.area,
            property.weekly_rent,
            property.room_type,
            property.url,
            build_property_reason(profile, property)
        ));
    }

    body.push_str(
        "\nNext steps:\n\
         - If any of these stand out, reply with your favourite 1–2 and I can check real-time availability.\n\
         - If none feel quite right, tell me what's missing (location, budget, vibe) and I can tweak the search.\n\n\
         We do get new rooms and studios coming up all the time, so we can keep an eye out for you.\n\n\
         Best,\nThe Housr Team",
    );

    format!("Subject: Your Housr housing matches in {}\n\n{}", area_phrase, body)
}

/// Script for a spoken follow-up voice note
pub fn build_voice_script<P: AsRef<Property>>(profile: &StudentProfile, properties: &[P]) -> String {
    let area_phrase = friendly_area_phrase(&profile.preferred_areas);
    let vibe_phrase = friendly_vibe_phrase(&profile.vibe_keywords);

    let mut snippets = vec![
        format!("Hey {}, it's the Housr team.", profile.display_name()),
        "Thanks again for jumping on the call about housing.".to_string(),
        format!(
            "I've had a look based on your budget of around £{} to £{} per week, looking in {}{}, {}.",
            profile.budget_min,
            profile.budget_max,
            area_phrase,
            move_in_clause(profile),
            vibe_phrase
        ),
    ];

    if !properties.is_empty() {
        snippets.push(format!(
            "I've picked out {} places that I think could work for you.",
            properties.len()
        ));
        for (index, property) in properties.iter().map(AsRef::<Property>::as_ref).enumerate() {
            snippets.push(format!(
                "Option {} is {} in {}, at around £{} a week. It's a {}, and it's {}.",
                index + 1,
                property.title,
                property.area,
                property.weekly_rent,
                property.room_type.to_lowercase(),
                property.distance_to_campus
            ));
        }
    }

    snippets.push(
        "Have a look at the links in the email, and just reply with your favourite one or two so \
         I can check live availability and the best rates for your dates."
            .to_string(),
    );
    snippets.push(
        "If none of these feel quite right, tell me what you want to change – things like \
         location, budget or vibe – and I can send over a fresh set of options."
            .to_string(),
    );
    snippets.push("Speak soon!".to_string());

    snippets.join(" ")
}

fn option_count(count: usize) -> String {
    match count {
        1 => "one great option".to_string(),
        2 => "two great options".to_string(),
        n => format!("{} great options", n),
    }
}

/// Follow-up email and voice note for a transcribed call
pub fn build_call_followup<P: AsRef<Property>>(info: &ExtractedInfo, properties: &[P]) -> CallFollowup {
    let subject = format!("Perfect rooms near {} - {} range", info.location, info.budget);

    let mut recap = format!("{} budget, {} move-in", info.budget, info.move_in_date);
    if !info.key_concerns.is_empty() {
        recap.push_str(&format!(", focus on {}", info.key_concerns.join(" and ")));
    }

    let mut body = format!(
        "Hi there!\n\n\
         Thanks for your call today - I'm excited to help you find your perfect student home near {}!\n\n",
        info.location
    );

    if properties.is_empty() {
        body.push_str(&format!(
            "Based on what you mentioned ({}), I'm searching for rooms that fit and will be in touch \
             as soon as something comes up.\n\n",
            recap
        ));
    } else {
        body.push_str(&format!(
            "Based on what you mentioned ({}), I've found {}:\n",
            recap,
            option_count(properties.len())
        ));

        for property in properties.iter().map(AsRef::<Property>::as_ref) {
            body.push_str(&format!(
                "\n🏠 **{}** - £{}/week\n• {}\n• {}\n",
                property.title, property.weekly_rent, property.distance_to_campus, property.room_type
            ));
            if let Some(notes) = property.notes.as_deref().filter(|n| !n.is_empty()) {
                body.push_str(&format!("• {}\n", notes));
            }
        }

        body.push_str(
            "\nWould you like to book a viewing this week? I can arrange virtual or in-person tours.\n\n",
        );
    }

    body.push_str(
        "Best regards,\nThe Housr Team\n\n\
         P.S. I've also attached a quick voice message with more details!",
    );

    let titles: Vec<String> = properties
        .iter()
        .map(AsRef::<Property>::as_ref)
        .map(|p| p.title.clone())
        .collect();
    let voice_note_text = if titles.is_empty() {
        "Hi! Just wanted to personally follow up on our chat. I'm still looking for the right place \
         for you and I'll be in touch as soon as something comes up!"
            .to_string()
    } else {
        format!(
            "Hi! Just wanted to personally follow up on our chat. I found {} for you - {}. \
             Let me know if you'd like to see them this week!",
            option_count(titles.len()),
            join_natural(&titles)
        )
    };

    CallFollowup {
        email: EmailDraft { subject, body },
        voice_note_text,
    }
}

static SUBJECT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Subject:.*?\n").expect("subject pattern"));
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern"));
static MARKDOWN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_#]").expect("markdown pattern"));
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}]")
        .expect("emoji pattern")
});

/// Clean written reply text before sending it to text-to-speech
pub fn prepare_for_speech(text: &str) -> String {
    let text = SUBJECT_LINE.replace_all(text, "");
    let text = URL.replace_all(&text, "check the link");
    let text = MARKDOWN.replace_all(&text, "");
    let text = EMOJI.replace_all(&text, "");
    text.trim().to_string()
}
