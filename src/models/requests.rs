use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::core::phrasing::{normalise_items, normalise_list};
use crate::models::domain::{AreaMatching, ExtractedInfo, Platform, StudentProfile, Tone};

/// Student preferences as submitted by the dashboard
///
/// `preferredAreas` and `vibeKeywords` accept either a JSON array or the raw
/// comma-separated text typed into the form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_budget_range"))]
pub struct RecommendRequest {
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(rename = "budgetMin")]
    pub budget_min: u32,
    #[serde(rename = "budgetMax", default)]
    pub budget_max: Option<u32>,
    #[serde(rename = "preferredAreas", default, deserialize_with = "list_input")]
    pub preferred_areas: Vec<String>,
    #[serde(rename = "moveInDate", default)]
    pub move_in_date: String,
    #[serde(rename = "vibeKeywords", default, deserialize_with = "list_input")]
    pub vibe_keywords: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[validate(range(min = 1, max = 10))]
    #[serde(rename = "maxResults", default)]
    pub max_results: Option<usize>,
    #[serde(rename = "areaMatching", default)]
    pub area_matching: Option<AreaMatching>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub platform: Platform,
}

impl RecommendRequest {
    pub fn budget_max(&self) -> u32 {
        self.budget_max.unwrap_or(self.budget_min)
    }

    /// Build the request-scoped profile the recommender works on
    pub fn to_profile(&self) -> StudentProfile {
        StudentProfile {
            first_name: self.first_name.trim().to_string(),
            university: non_blank(&self.university),
            course: non_blank(&self.course),
            budget_min: self.budget_min,
            budget_max: self.budget_max(),
            preferred_areas: self.preferred_areas.clone(),
            move_in_date: self.move_in_date.trim().to_string(),
            vibe_keywords: self.vibe_keywords.clone(),
            notes: self.notes.trim().to_string(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_budget_range(req: &RecommendRequest) -> Result<(), ValidationError> {
    if req.budget_min > req.budget_max() {
        let mut err = ValidationError::new("budget_range");
        err.message = Some("budgetMin must not exceed budgetMax".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Many(Vec<String>),
    Raw(String),
}

fn list_input<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ListInput::deserialize(deserializer)? {
        ListInput::Many(items) => normalise_items(items),
        ListInput::Raw(raw) => normalise_list(&raw),
    })
}

/// Request for a spoken version of the student summary
///
/// When `text` is blank the voice script is generated from the profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VoiceNoteRequest {
    #[validate(nested)]
    #[serde(flatten)]
    pub profile: RecommendRequest,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "voiceId", alias = "voice_id", default)]
    pub voice_id: Option<String>,
}

impl VoiceNoteRequest {
    pub fn voice(&self) -> Option<&str> {
        non_blank_str(&self.voice_id)
    }
}

/// Request body for `generate-voice-reply`
///
/// `text` is kept loosely typed so a non-string value is reported as invalid
/// input rather than a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVoiceRequest {
    #[serde(default)]
    pub text: Option<serde_json::Value>,
    /// Overrides the configured default voice
    #[serde(rename = "voiceId", alias = "voice_id", default)]
    pub voice_id: Option<String>,
}

impl GenerateVoiceRequest {
    pub fn voice(&self) -> Option<&str> {
        non_blank_str(&self.voice_id)
    }
}

/// Request body for `transcribe`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeRequest {
    #[serde(rename = "callId", alias = "call_id", default)]
    pub call_id: Option<serde_json::Value>,
    /// Language hint for speech-to-text, detected when unset
    #[serde(rename = "languageCode", alias = "language_code", default)]
    pub language_code: Option<String>,
}

impl TranscribeRequest {
    /// Numeric call id, accepting numbers and numeric strings
    pub fn call_number(&self) -> Option<u64> {
        match self.call_id.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        non_blank_str(&self.language_code)
    }
}

/// Request body for the call-copilot `generate-reply` step
///
/// Carries the `extracted_info` returned by `transcribe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallReplyRequest {
    #[serde(alias = "extractedInfo")]
    pub extracted_info: ExtractedInfo,
}

fn non_blank_str(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_fields_accept_raw_text() {
        let req: RecommendRequest = serde_json::from_value(json!({
            "budgetMin": 170,
            "budgetMax": 220,
            "preferredAreas": "Fallowfield, City Centre, ",
            "vibeKeywords": ["Social", " modern "]
        }))
        .unwrap();

        assert_eq!(req.preferred_areas, vec!["fallowfield", "city centre"]);
        assert_eq!(req.vibe_keywords, vec!["social", "modern"]);
    }

    #[test]
    fn test_budget_max_defaults_to_min() {
        let req: RecommendRequest =
            serde_json::from_value(json!({ "budgetMin": 180 })).unwrap();

        assert_eq!(req.to_profile().budget_max, 180);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_inverted_budget_rejected() {
        let req: RecommendRequest = serde_json::from_value(json!({
            "budgetMin": 250,
            "budgetMax": 200
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_call_number_parsing() {
        let request = |id| TranscribeRequest {
            call_id: Some(id),
            language_code: None,
        };
        let numeric = request(json!(2));
        let text = request(json!("3"));
        let other = request(json!(true));

        assert_eq!(numeric.call_number(), Some(2));
        assert_eq!(text.call_number(), Some(3));
        assert_eq!(other.call_number(), None);
    }

    #[test]
    fn test_optional_voice_and_language() {
        let voice: GenerateVoiceRequest =
            serde_json::from_value(json!({ "text": "hi", "voiceId": "EXAVITQu4vr4xnSDxMaL" })).unwrap();
        assert_eq!(voice.voice(), Some("EXAVITQu4vr4xnSDxMaL"));

        let blank: GenerateVoiceRequest =
            serde_json::from_value(json!({ "text": "hi", "voice_id": "  " })).unwrap();
        assert_eq!(blank.voice(), None);

        let transcribe: TranscribeRequest =
            serde_json::from_value(json!({ "callId": 1, "languageCode": "en" })).unwrap();
        assert_eq!(transcribe.language(), Some("en"));
    }
}
