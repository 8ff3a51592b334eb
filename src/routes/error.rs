use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::{ProviderError, RecommendError};

pub const MAX_SPEECH_CHARS: usize = 5000;

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid text parameter")]
    InvalidText,

    #[error("Text too long. Maximum 5000 characters.")]
    TextTooLong,

    #[error("Invalid call ID")]
    InvalidCallId,

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("invalid_json")]
    InvalidJson(String),

    #[error("ElevenLabs API key configuration error")]
    ProviderConfig,

    #[error("ElevenLabs quota exceeded")]
    QuotaExceeded,

    #[error("Voice generation failed")]
    VoiceGeneration,

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Map a text-to-speech failure to its client-facing error
    pub fn from_voice(err: ProviderError) -> Self {
        tracing::error!("Voice generation error: {}", err);
        if err.is_credentials() {
            ApiError::ProviderConfig
        } else if err.is_quota() {
            ApiError::QuotaExceeded
        } else {
            ApiError::VoiceGeneration
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ApiError::Validation(errors) => Some(errors.to_string()),
            ApiError::InvalidJson(message) => Some(message.clone()),
            _ => None,
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidText
            | ApiError::TextTooLong
            | ApiError::InvalidCallId
            | ApiError::Validation(_)
            | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ProviderConfig | ApiError::VoiceGeneration | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(cause) = self {
            tracing::error!("Internal error: {}", cause);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            message: self.detail(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(format!("Invalid JSON: {}", err)).into()
}
