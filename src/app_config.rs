use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Speech synthesis config
    pub synthesis: SynthesisConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Audio encoding requested from the synthesis service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioEncoding {
    /// MPEG audio layer III
    #[default]
    Mp3,
    /// Uncompressed 16-bit signed little-endian samples in a WAV container
    Linear16,
    /// Opus in an Ogg container
    OggOpus,
}

impl AudioEncoding {
    /// Wire value expected by the Google synthesis API
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Linear16 => "LINEAR16",
            Self::OggOpus => "OGG_OPUS",
        }
    }

    /// File extension for the assembled output
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Linear16 => "wav",
            Self::OggOpus => "ogg",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Speech synthesis service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Voice language code (BCP-47, e.g. "en-US")
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Voice name (e.g. "en-US-Standard-F")
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Requested audio encoding
    #[serde(default)]
    pub audio_encoding: AudioEncoding,

    /// Maximum characters per synthesis request.
    ///
    /// Dictated by the service's documented per-request input limit, kept
    /// configurable so a limit change never touches the chunking logic.
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds), doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            language_code: default_language_code(),
            voice: default_voice(),
            audio_encoding: AudioEncoding::default(),
            max_chars_per_request: default_max_chars_per_request(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Default output basename when none is given on the command line
    #[serde(default = "default_output_name")]
    pub default_name: String,

    /// Whether to also write the extracted raw text next to the input file
    #[serde(default)]
    pub export_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_name: default_output_name(),
            export_text: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_chars_per_request() -> usize {
    // Documented input limit of the Google Cloud TTS v1 synthesize endpoint
    5000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_endpoint() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_voice() -> String {
    crate::voices::DEFAULT_VOICE.to_string()
}

fn default_output_name() -> String {
    "out".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.synthesis.api_key.is_empty() {
            return Err(anyhow!(
                "Synthesis API key is required (set synthesis.api_key in the config file or GOOGLE_TTS_API_KEY in the environment)"
            ));
        }

        if self.synthesis.endpoint.is_empty() {
            return Err(anyhow!("Synthesis endpoint must not be empty"));
        }

        if self.synthesis.max_chars_per_request == 0 {
            return Err(anyhow!("max_chars_per_request must be greater than zero"));
        }

        // The voice must come from the known catalog and agree with the language code
        let voice = crate::voices::find_voice(&self.synthesis.voice)
            .ok_or_else(|| anyhow!("Unknown voice: {}", self.synthesis.voice))?;
        if voice.language_code != self.synthesis.language_code {
            return Err(anyhow!(
                "Voice {} belongs to language {}, but language_code is {}",
                voice.name,
                voice.language_code,
                self.synthesis.language_code
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            synthesis: SynthesisConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
