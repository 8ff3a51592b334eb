use actix_web::{http::header, web, HttpResponse};
use serde_json::Value;

use crate::core::extract_key_information;
use crate::models::{
    CallReplyRequest, GenerateVoiceRequest, RiskAnalysis, TranscribeRequest, TranscribeResponse,
};
use crate::routes::error::{ApiError, MAX_SPEECH_CHARS};
use crate::routes::AppState;

/// Configure call-copilot routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/call-copilot")
            .route("/generate-voice-reply", web::post().to(generate_voice_reply))
            .route("/transcribe", web::post().to(transcribe))
            .route("/generate-reply", web::post().to(generate_reply))
            .route("/risk-check", web::post().to(risk_check)),
    );
}

/// Check the text sent for synthesis
///
/// Length is counted in characters.
pub fn validate_speech_text(text: Option<&Value>) -> Result<&str, ApiError> {
    let text = match text {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        _ => return Err(ApiError::InvalidText),
    };

    if text.chars().count() > MAX_SPEECH_CHARS {
        return Err(ApiError::TextTooLong);
    }

    Ok(text)
}

/// Wrap synthesized MP3 bytes in an uncached response
pub fn audio_response(audio: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("audio/mpeg")
        .insert_header((header::CACHE_CONTROL, "no-store, max-age=0"))
        .body(audio)
}

/// Generate voice reply endpoint
///
/// POST /api/call-copilot/generate-voice-reply
///
/// Request body:
/// ```json
/// { "text": "string, at most 5000 characters", "voiceId": "optional" }
/// ```
async fn generate_voice_reply(
    state: web::Data<AppState>,
    req: web::Json<GenerateVoiceRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = validate_speech_text(req.text.as_ref())?;

    let preview: String = text.chars().take(100).collect();
    tracing::info!(
        "Generating voice reply: chars={}, preview={:?}",
        text.chars().count(),
        preview
    );

    let audio = state
        .speech
        .synthesize(text, req.voice())
        .await
        .map_err(ApiError::from_voice)?;

    Ok(audio_response(audio))
}

/// Transcribe sample call endpoint
///
/// POST /api/call-copilot/transcribe
///
/// Request body:
/// ```json
/// { "callId": 1, "languageCode": "optional" }
/// ```
async fn transcribe(
    state: web::Data<AppState>,
    req: web::Json<TranscribeRequest>,
) -> Result<HttpResponse, ApiError> {
    let call = req
        .call_number()
        .and_then(|id| state.samples.get(id))
        .ok_or(ApiError::InvalidCallId)?;

    tracing::info!(
        "Processing transcription request: call={}, file={}",
        call.id,
        state.samples.audio_path(call).display()
    );

    let (result, source) = state
        .samples
        .transcribe(call, state.speech.as_ref(), req.language())
        .await;
    tracing::debug!("Transcript for call {} from {:?}", call.id, source);

    let extracted_info = extract_key_information(&result.text);

    Ok(HttpResponse::Ok().json(TranscribeResponse {
        transcript: result.text,
        language: result.language_code,
        confidence: result.language_probability,
        extracted_info,
    }))
}

/// Follow-up reply after a call
///
/// POST /api/call-copilot/generate-reply
///
/// Request body: `{ "extracted_info": { ... } }` as returned by `transcribe`.
async fn generate_reply(
    state: web::Data<AppState>,
    req: web::Json<CallReplyRequest>,
) -> Result<HttpResponse, ApiError> {
    let info = &req.extracted_info;
    tracing::info!(
        "Generating call follow-up: location={}, budget={}",
        info.location,
        info.budget
    );

    let response = state.recommender.call_followup(info).await;
    Ok(HttpResponse::Ok().json(response))
}

/// Compliance risk check endpoint
///
/// POST /api/call-copilot/risk-check
async fn risk_check() -> HttpResponse {
    HttpResponse::Ok().json(RiskAnalysis::baseline())
}
