use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{AreaMatching, MatchWeights, TieBreak};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub voice: VoiceSettings,
    #[serde(default)]
    pub recommender: RecommenderSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub samples: SampleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// ElevenLabs connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_voice_id")]
    pub default_voice_id: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_stt_model")]
    pub stt_model: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            default_voice_id: default_voice_id(),
            tts_model: default_tts_model(),
            stt_model: default_stt_model(),
            timeout_secs: None,
        }
    }
}

fn default_endpoint() -> String { "https://api.elevenlabs.io/v1".to_string() }
fn default_voice_id() -> String { "21m00Tcm4TlvDq8ikWAM".to_string() }
fn default_tts_model() -> String { "eleven_flash_v2_5".to_string() }
fn default_stt_model() -> String { "scribe_v1".to_string() }

/// Text-to-speech voice tuning, sent as-is to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default = "default_stability")]
    pub stability: f64,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
    #[serde(default = "default_style")]
    pub style: f64,
    #[serde(default = "default_true")]
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: default_style(),
            use_speaker_boost: true,
        }
    }
}

fn default_stability() -> f64 { 0.5 }
fn default_similarity_boost() -> f64 { 0.75 }
fn default_style() -> f64 { 0.2 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderSettings {
    /// Artificial delay before scoring, zero disables it
    #[serde(default)]
    pub simulated_latency_ms: u64,
    #[serde(default = "default_reply_max_results")]
    pub reply_max_results: usize,
    #[serde(default = "default_summary_max_results")]
    pub summary_max_results: usize,
    #[serde(default)]
    pub area_matching: AreaMatching,
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 0,
            reply_max_results: default_reply_max_results(),
            summary_max_results: default_summary_max_results(),
            area_matching: AreaMatching::default(),
            tie_break: TieBreak::default(),
        }
    }
}

fn default_reply_max_results() -> usize { 2 }
fn default_summary_max_results() -> usize { 3 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_budget_bonus")]
    pub budget_bonus: f64,
    #[serde(default = "default_budget_penalty_divisor")]
    pub budget_penalty_divisor: f64,
    #[serde(default = "default_area_exact")]
    pub area_exact: f64,
    #[serde(default = "default_area_partial")]
    pub area_partial: f64,
    #[serde(default = "default_vibe_match")]
    pub vibe_match: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            budget_bonus: default_budget_bonus(),
            budget_penalty_divisor: default_budget_penalty_divisor(),
            area_exact: default_area_exact(),
            area_partial: default_area_partial(),
            vibe_match: default_vibe_match(),
        }
    }
}

impl WeightsConfig {
    /// Reject weights that would make scores non-finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.budget_penalty_divisor.is_finite() && self.budget_penalty_divisor > 0.0) {
            return Err(ConfigError::Message(format!(
                "scoring.weights.budget_penalty_divisor must be positive, got {}",
                self.budget_penalty_divisor
            )));
        }

        let terms = [
            ("budget_bonus", self.budget_bonus),
            ("area_exact", self.area_exact),
            ("area_partial", self.area_partial),
            ("vibe_match", self.vibe_match),
        ];
        if let Some((name, value)) = terms.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Message(format!(
                "scoring.weights.{} must be finite, got {}",
                name, value
            )));
        }

        Ok(())
    }
}

impl From<&WeightsConfig> for MatchWeights {
    fn from(cfg: &WeightsConfig) -> Self {
        Self {
            budget_bonus: cfg.budget_bonus,
            budget_penalty_divisor: cfg.budget_penalty_divisor,
            area_exact: cfg.area_exact,
            area_partial: cfg.area_partial,
            vibe_match: cfg.vibe_match,
        }
    }
}

fn default_budget_bonus() -> f64 { 4.0 }
fn default_budget_penalty_divisor() -> f64 { 50.0 }
fn default_area_exact() -> f64 { 3.0 }
fn default_area_partial() -> f64 { 1.5 }
fn default_vibe_match() -> f64 { 1.5 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// TOML or JSON listing file; the built-in catalog is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleSettings {
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
        }
    }
}

fn default_audio_dir() -> PathBuf { PathBuf::from("public/sample-calls") }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOUSR__)
    /// 5. Legacy ElevenLabs variables (ELEVENLABS_API_KEY and friends)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOUSR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOUSR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = apply_provider_env(settings)?.try_deserialize()?;
        settings.scoring.weights.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HOUSR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.scoring.weights.validate()?;
        Ok(settings)
    }

    pub fn match_weights(&self) -> MatchWeights {
        MatchWeights::from(&self.scoring.weights)
    }
}

/// Apply the provider variables used by the dashboard's `.env` files
///
/// ELEVEN_API_KEY is accepted as an alias of ELEVENLABS_API_KEY.
fn apply_provider_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("ELEVENLABS_API_KEY")
        .or_else(|_| env::var("ELEVEN_API_KEY"))
        .ok()
        .filter(|k| !k.is_empty());
    let voice_id = env::var("ELEVENLABS_DEFAULT_VOICE_ID")
        .or_else(|_| env::var("ELEVEN_VOICE_ID"))
        .ok()
        .filter(|v| !v.is_empty());

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = api_key {
        builder = builder.set_override("provider.api_key", key)?;
    }
    if let Some(voice) = voice_id {
        builder = builder.set_override("provider.default_voice_id", voice)?;
    }

    builder.build()
}
