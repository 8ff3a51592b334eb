// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AreaMatching, CallFollowup, EmailDraft, ExtractedInfo, MatchWeights, Platform, Property,
    RiskAnalysis, RiskChecks, ScoredProperty, StudentProfile, TieBreak, Tone, Transcription,
};
pub use requests::{
    CallReplyRequest, GenerateVoiceRequest, RecommendRequest, TranscribeRequest, VoiceNoteRequest,
};
pub use responses::{
    CallReplyResponse, ErrorResponse, HealthResponse, RecommendResponse, ReplyResponse,
    SummaryResponse, TranscribeResponse,
};
