// Core algorithm exports
pub mod extraction;
pub mod matcher;
pub mod phrasing;
pub mod scoring;
pub mod templates;
pub mod wizard;

pub use extraction::extract_key_information;
pub use matcher::{Matcher, MatchResult};
pub use phrasing::{friendly_area_phrase, friendly_vibe_phrase, normalise_list};
pub use scoring::score_property;
pub use templates::{
    build_call_followup, build_email, build_property_reason, build_voice_script, generate_content,
    prepare_for_speech,
};
pub use wizard::{ReplyDraft, ReplyWizard, WizardError, WizardEvent, WizardStage, WizardState};
