use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ProviderSettings, VoiceSettings};
use crate::models::Transcription;

/// Errors that can occur when talking to the speech provider
///
/// Variants are classified from the HTTP status and the structured error body,
/// so callers can map them without inspecting message text.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("ElevenLabs API key is not set")]
    MissingCredentials,

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Quota exceeded")]
    QuotaExceeded,

    #[error("API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Credential or configuration problem on our side
    pub fn is_credentials(&self) -> bool {
        matches!(self, ProviderError::MissingCredentials | ProviderError::Unauthorized)
    }

    pub fn is_quota(&self) -> bool {
        matches!(self, ProviderError::QuotaExceeded)
    }
}

/// Speech-to-text and text-to-speech provider
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Transcribe raw audio bytes
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        language_code: Option<&str>,
    ) -> Result<Transcription, ProviderError>;

    /// Synthesize speech, returning MP3 bytes
    async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>, ProviderError>;

    fn has_credentials(&self) -> bool;
}

#[derive(Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// ElevenLabs API client
pub struct ElevenLabsClient {
    base_url: String,
    api_key: Option<String>,
    default_voice_id: String,
    tts_model: String,
    stt_model: String,
    voice_settings: VoiceSettings,
    client: Client,
}

impl ElevenLabsClient {
    /// Create a new ElevenLabs client
    ///
    /// A missing API key is not an error here; requests fail with
    /// `ProviderError::MissingCredentials` instead.
    pub fn new(settings: &ProviderSettings, voice_settings: VoiceSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.unwrap_or(30)))
            .build()?;

        Ok(Self {
            base_url: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            default_voice_id: settings.default_voice_id.clone(),
            tts_model: settings.tts_model.clone(),
            stt_model: settings.stt_model.clone(),
            voice_settings,
            client,
        })
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or(ProviderError::MissingCredentials)
    }
}

/// Map a non-success response to an error kind
async fn classify_failure(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read body".to_string());

    let detail_status = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            json.pointer("/detail/status")
                .and_then(|s| s.as_str())
                .map(str::to_string)
        });

    classify_status(status, detail_status.as_deref(), body)
}

fn classify_status(status: StatusCode, detail_status: Option<&str>, body: String) -> ProviderError {
    match (status, detail_status) {
        (StatusCode::TOO_MANY_REQUESTS, _) | (_, Some("quota_exceeded")) => ProviderError::QuotaExceeded,
        (StatusCode::UNAUTHORIZED, _) => ProviderError::Unauthorized,
        _ => ProviderError::Upstream {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        language_code: Option<&str>,
    ) -> Result<Transcription, ProviderError> {
        let api_key = self.api_key()?;
        let url = format!("{}/speech-to-text", self.base_url);
        let size_kb = audio.len() / 1024;

        let file = multipart::Part::bytes(audio)
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")?;

        let mut form = multipart::Form::new()
            .part("file", file)
            .text("model_id", self.stt_model.clone())
            .text("timestamps_granularity", "word")
            .text("tag_audio_events", "true");

        if let Some(code) = language_code {
            form = form.text("language_code", code.to_string());
        }

        tracing::debug!("Sending {}KB of audio to {}", size_kb, url);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = classify_failure(response).await;
            tracing::error!("ElevenLabs STT error: {}", err);
            return Err(err);
        }

        let result: Transcription = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse transcript: {}", e)))?;

        tracing::info!(
            "STT completed: language={}, confidence={:.2}, chars={}",
            result.language_code,
            result.language_probability,
            result.text.len()
        );

        Ok(result)
    }

    async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>, ProviderError> {
        let api_key = self.api_key()?;
        let voice_id = voice_id.unwrap_or(&self.default_voice_id);
        let url = format!(
            "{}/text-to-speech/{}",
            self.base_url,
            urlencoding::encode(voice_id)
        );

        tracing::debug!("Generating voice reply: chars={}, voice={}", text.chars().count(), voice_id);

        let body = TextToSpeechBody {
            text,
            model_id: &self.tts_model,
            voice_settings: &self.voice_settings,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = classify_failure(response).await;
            tracing::error!("ElevenLabs TTS error: {}", err);
            return Err(err);
        }

        let audio = response.bytes().await?.to_vec();
        tracing::info!("TTS completed: {}KB", audio.len() / 1024);

        Ok(audio)
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: &str, api_key: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            endpoint: endpoint.to_string(),
            api_key: api_key.map(str::to_string),
            default_voice_id: "voice-1".to_string(),
            tts_model: "eleven_flash_v2_5".to_string(),
            stt_model: "scribe_v1".to_string(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ElevenLabsClient::new(
            &settings("https://api.elevenlabs.io/v1/", Some("test_key")),
            VoiceSettings::default(),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://api.elevenlabs.io/v1");
        assert!(client.has_credentials());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client =
            ElevenLabsClient::new(&settings("http://localhost", Some("  ")), VoiceSettings::default())
                .unwrap();

        assert!(!client.has_credentials());
    }

    #[test]
    fn test_classify_status() {
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, None, String::new()).is_quota());
        assert!(classify_status(StatusCode::UNAUTHORIZED, Some("quota_exceeded"), String::new()).is_quota());
        assert!(classify_status(StatusCode::UNAUTHORIZED, None, String::new()).is_credentials());
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, None, "oops".into()),
            ProviderError::Upstream { status: 502, .. }
        ));
    }

    #[tokio::test]
    async fn test_synthesize_missing_key() {
        let client =
            ElevenLabsClient::new(&settings("http://localhost", None), VoiceSettings::default()).unwrap();

        let err = client.synthesize("hello", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials));
    }

    #[tokio::test]
    async fn test_synthesize_returns_audio() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/text-to-speech/voice-1")
            .match_header("xi-api-key", "test_key")
            .match_header("accept", "audio/mpeg")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "text": "hello there",
                "model_id": "eleven_flash_v2_5"
            })))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(vec![0xFF, 0xFB, 0x90, 0x64])
            .create_async()
            .await;

        let client =
            ElevenLabsClient::new(&settings(&server.url(), Some("test_key")), VoiceSettings::default())
                .unwrap();

        let audio = client.synthesize("hello there", None).await.unwrap();
        assert_eq!(audio, vec![0xFF, 0xFB, 0x90, 0x64]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_synthesize_quota_from_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/text-to-speech/custom")
            .with_status(401)
            .with_body(r#"{"detail":{"status":"quota_exceeded","message":"This request exceeds your quota."}}"#)
            .create_async()
            .await;

        let client =
            ElevenLabsClient::new(&settings(&server.url(), Some("test_key")), VoiceSettings::default())
                .unwrap();

        let err = client.synthesize("hello", Some("custom")).await.unwrap_err();
        assert!(err.is_quota());
    }

    #[tokio::test]
    async fn test_transcribe_parses_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/speech-to-text")
            .match_header("xi-api-key", "test_key")
            .with_status(200)
            .with_body(
                r#"{"text":"Budget is 160 per week","language_code":"en","language_probability":0.97,"words":[]}"#,
            )
            .create_async()
            .await;

        let client =
            ElevenLabsClient::new(&settings(&server.url(), Some("test_key")), VoiceSettings::default())
                .unwrap();

        let result = client.transcribe(vec![1, 2, 3], None).await.unwrap();
        assert_eq!(result.text, "Budget is 160 per week");
        assert_eq!(result.language_code, "en");
    }
}
