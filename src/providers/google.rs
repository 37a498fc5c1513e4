use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::SynthesisConfig;
use crate::errors::SynthesisError;
use crate::providers::TtsProvider;

/// Google Cloud Text-to-Speech client (v1 REST surface)
pub struct GoogleTts {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Voice language code (e.g. "en-US")
    language_code: String,
    /// Voice name (e.g. "en-US-Standard-F")
    voice: String,
    /// Requested audio encoding wire value (e.g. "MP3")
    audio_encoding: String,
}

/// Synthesis request body
#[derive(Debug, Serialize)]
pub struct SynthesizeRequest {
    /// The text to synthesize
    input: SynthesisInput,

    /// Voice selection parameters
    voice: VoiceSelectionParams,

    /// Audio output configuration
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

/// Text payload of a synthesis request
#[derive(Debug, Serialize)]
pub struct SynthesisInput {
    /// Raw text (SSML is not used by this tool)
    text: String,
}

/// Voice parameters of a synthesis request
#[derive(Debug, Serialize)]
pub struct VoiceSelectionParams {
    /// BCP-47 language code
    #[serde(rename = "languageCode")]
    language_code: String,

    /// Full voice identifier
    name: String,
}

/// Audio output parameters of a synthesis request
#[derive(Debug, Serialize)]
pub struct AudioConfig {
    /// Encoding of the returned audio bytes
    #[serde(rename = "audioEncoding")]
    audio_encoding: String,
}

/// Synthesis response
#[derive(Debug, Deserialize)]
pub struct SynthesizeResponse {
    /// Base64-encoded audio bytes
    #[serde(rename = "audioContent")]
    pub audio_content: String,
}

/// Error body returned by the API on failure
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GoogleTts {
    /// Create a new client from the synthesis configuration
    pub fn new(config: &SynthesisConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            language_code: config.language_code.clone(),
            voice: config.voice.clone(),
            audio_encoding: config.audio_encoding.api_name().to_string(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://texttospeech.googleapis.com/v1/text:synthesize".to_string()
        } else {
            format!("{}/v1/text:synthesize", self.endpoint.trim_end_matches('/'))
        }
    }

    /// Issue a single synthesis request without retries
    async fn synthesize_once(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let request = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelectionParams {
                language_code: self.language_code.clone(),
                name: self.voice.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.audio_encoding.clone(),
            },
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    SynthesisError::ConnectionError(e.to_string())
                } else {
                    SynthesisError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());

            // Prefer the structured message when the body parses
            let message = serde_json::from_str::<ApiErrorResponse>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);

            error!("Synthesis API error ({}): {}", status, message);

            return Err(match status.as_u16() {
                401 | 403 => SynthesisError::AuthenticationError(message),
                429 => SynthesisError::QuotaExceeded(message),
                code => SynthesisError::ApiError {
                    status_code: code,
                    message,
                },
            });
        }

        let synthesize_response = response
            .json::<SynthesizeResponse>()
            .await
            .map_err(|e| SynthesisError::ParseError(e.to_string()))?;

        BASE64
            .decode(&synthesize_response.audio_content)
            .map_err(|e| SynthesisError::ParseError(format!("Invalid base64 audio content: {}", e)))
    }
}

#[async_trait]
impl TtsProvider for GoogleTts {
    /// One blocking-await round trip per chunk; retries belong to the pipeline
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let audio = self.synthesize_once(text).await?;
        debug!(
            "Synthesized {} characters into {} audio bytes",
            text.chars().count(),
            audio.len()
        );
        Ok(audio)
    }
}
