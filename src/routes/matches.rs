use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{HealthResponse, RecommendRequest, VoiceNoteRequest};
use crate::routes::copilot::{audio_response, validate_speech_text};
use crate::routes::error::ApiError;
use crate::routes::AppState;

/// Configure matching, reply-engine and summary routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/recommend", web::post().to(recommend))
        .route("/reply-engine/generate", web::post().to(generate_reply))
        .route("/student-summary/generate", web::post().to(generate_summary))
        .route("/student-summary/voice-note", web::post().to(voice_note));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let has_provider_key = state.speech.has_credentials();
    let status = if has_provider_key { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        has_provider_key,
    })
}

fn validate_request<T: Validate>(req: &T, endpoint: &str) -> Result<(), ApiError> {
    req.validate().map_err(|errors| {
        tracing::info!("Validation failed for {} request: {}", endpoint, errors);
        ApiError::from(errors)
    })
}

/// Recommend properties endpoint
///
/// POST /api/matches/recommend
///
/// Request body:
/// ```json
/// {
///   "firstName": "string",
///   "budgetMin": 170,
///   "budgetMax": 220,
///   "preferredAreas": "fallowfield, city centre",
///   "vibeKeywords": ["social"],
///   "maxResults": 3
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*req, "recommend")?;

    let response = state.recommender.recommend(&req).await;
    Ok(HttpResponse::Ok().json(response))
}

/// Reply engine endpoint
///
/// POST /api/reply-engine/generate
///
/// Same body as recommend, plus `tone` and `platform`.
async fn generate_reply(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*req, "reply-engine")?;

    let response = state.recommender.draft_reply(&req).await?;

    tracing::info!(
        "Generated {:?} reply ({:?}) with {} matches",
        req.platform,
        req.tone,
        response.matches.len()
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Student summary endpoint
///
/// POST /api/student-summary/generate
async fn generate_summary(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*req, "student-summary")?;

    let response = state.recommender.summary(&req).await;
    Ok(HttpResponse::Ok().json(response))
}

/// Summary voice note endpoint
///
/// POST /api/student-summary/voice-note
///
/// Synthesizes `text` when given, otherwise a voice script built from the profile.
async fn voice_note(
    state: web::Data<AppState>,
    req: web::Json<VoiceNoteRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*req, "voice-note")?;

    let script = state.recommender.voice_note_text(&req).await;
    let script = serde_json::Value::String(script);
    let text = validate_speech_text(Some(&script))?;

    let audio = state
        .speech
        .synthesize(text, req.voice())
        .await
        .map_err(ApiError::from_voice)?;

    Ok(audio_response(audio))
}
