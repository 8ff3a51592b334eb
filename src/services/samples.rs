use std::path::{Path, PathBuf};

use crate::models::Transcription;
use crate::services::eleven::SpeechProvider;

/// A recorded demo call and the transcript used when it cannot be transcribed
#[derive(Debug, Clone)]
pub struct SampleCall {
    pub id: u64,
    pub file_name: &'static str,
    fallback_text: &'static str,
    fallback_language: &'static str,
    fallback_confidence: f64,
}

impl SampleCall {
    pub fn fallback(&self) -> Transcription {
        Transcription {
            text: self.fallback_text.to_string(),
            language_code: self.fallback_language.to_string(),
            language_probability: self.fallback_confidence,
        }
    }
}

/// Where a transcript came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptSource {
    Provider,
    Fallback,
}

static SAMPLE_CALLS: [SampleCall; 3] = [
    SampleCall {
        id: 1,
        file_name: "manchester-inquiry.mp3",
        fallback_text: "Hi, I'm looking for a room near Manchester University. My budget is around £160 per week, and I need to move in by September. I'm a bit worried about safety in the area - are there any security measures? Also, I want to make sure all bills are included because I don't want any surprises.",
        fallback_language: "en",
        fallback_confidence: 0.95,
    },
    SampleCall {
        id: 2,
        file_name: "london-budget.mp3",
        fallback_text: "Main London mein room dhund raha hun, budget around £150 per week. I need something close to university, maybe Fallowfield area. Bills should be included ya separate? When can I move in?",
        fallback_language: "hi-en",
        fallback_confidence: 0.88,
    },
    SampleCall {
        id: 3,
        file_name: "birmingham-safety.mp3",
        fallback_text: "I'm concerned about safety in the area around Birmingham. Are there security measures in place? I need a room for around £170 per week, preferably close to campus. What about transport links?",
        fallback_language: "en",
        fallback_confidence: 0.96,
    },
];

/// The three demo calls shown in the call copilot
#[derive(Debug, Clone)]
pub struct SampleCallLibrary {
    audio_dir: PathBuf,
}

impl SampleCallLibrary {
    pub fn new<P: Into<PathBuf>>(audio_dir: P) -> Self {
        Self {
            audio_dir: audio_dir.into(),
        }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    pub fn get(&self, id: u64) -> Option<&'static SampleCall> {
        SAMPLE_CALLS.iter().find(|c| c.id == id)
    }

    pub fn audio_path(&self, call: &SampleCall) -> PathBuf {
        self.audio_dir.join(call.file_name)
    }

    /// Transcribe a sample call, recovering with its fixed transcript
    ///
    /// A missing audio file, a read error and any provider failure all fall
    /// back; this never fails. `language_code` is passed to the provider as a
    /// hint.
    pub async fn transcribe(
        &self,
        call: &SampleCall,
        provider: &dyn SpeechProvider,
        language_code: Option<&str>,
    ) -> (Transcription, TranscriptSource) {
        let path = self.audio_path(call);

        let audio = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    "Audio file {} unavailable ({}), using fallback transcript",
                    path.display(),
                    e
                );
                return (call.fallback(), TranscriptSource::Fallback);
            }
        };

        tracing::info!("Audio file found, sending {}KB to provider", audio.len() / 1024);

        match provider.transcribe(audio, language_code).await {
            Ok(result) => (result, TranscriptSource::Provider),
            Err(e) => {
                tracing::warn!("Transcription failed for call {}, using fallback: {}", call.id, e);
                (call.fallback(), TranscriptSource::Fallback)
            }
        }
    }
}

impl Default for SampleCallLibrary {
    fn default() -> Self {
        Self::new("public/sample-calls")
    }
}
