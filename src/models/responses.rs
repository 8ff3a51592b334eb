use serde::{Deserialize, Serialize};
use crate::core::wizard::WizardStage;
use crate::models::domain::{EmailDraft, ExtractedInfo, ScoredProperty};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub request_id: String,
    pub matches: Vec<ScoredProperty>,
    pub total_candidates: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the reply engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub request_id: String,
    pub stage: WizardStage,
    pub content: String,
    pub matches: Vec<ScoredProperty>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the student summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub request_id: String,
    pub email: String,
    pub voice_script: String,
    pub match_count: usize,
    pub matches: Vec<ScoredProperty>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the transcribe endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub transcript: String,
    pub language: String,
    pub confidence: f64,
    pub extracted_info: ExtractedInfo,
}

/// Response for the call-copilot reply step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallReplyResponse {
    pub request_id: String,
    pub email: EmailDraft,
    pub voice_note_text: String,
    pub properties: Vec<ScoredProperty>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub has_provider_key: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
