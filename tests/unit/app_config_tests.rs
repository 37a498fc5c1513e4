/*!
 * Tests for application configuration
 */

use anyhow::Result;
use lectura::app_config::{AudioEncoding, Config};

use crate::common;

/// Defaults match the service's documented limits and this tool's conventions
#[test]
fn test_default_config_shouldUseServiceLimits() {
    let config = Config::default();

    assert_eq!(config.synthesis.max_chars_per_request, 5000);
    assert_eq!(config.synthesis.endpoint, "https://texttospeech.googleapis.com");
    assert_eq!(config.synthesis.language_code, "en-US");
    assert_eq!(config.synthesis.voice, "en-US-Standard-F");
    assert_eq!(config.synthesis.audio_encoding, AudioEncoding::Mp3);
    assert_eq!(config.output.default_name, "out");
    assert_eq!(config.synthesis.retry_count, 3);
}

/// A default config round-trips through its JSON representation
#[test]
fn test_config_withJsonRoundTrip_shouldPreserveValues() -> Result<()> {
    let mut config = Config::default();
    config.synthesis.api_key = "k".to_string();
    config.synthesis.voice = "en-US-Wavenet-H".to_string();

    let json = serde_json::to_string_pretty(&config)?;
    let restored: Config = serde_json::from_str(&json)?;

    assert_eq!(restored.synthesis.voice, "en-US-Wavenet-H");
    assert_eq!(restored.synthesis.max_chars_per_request, 5000);
    Ok(())
}

/// Partial config files fall back to defaults for missing fields
#[test]
fn test_config_withPartialJson_shouldApplyDefaults() -> Result<()> {
    let json = r#"{ "synthesis": { "api_key": "k", "voice": "en-US-Wavenet-A" } }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.synthesis.voice, "en-US-Wavenet-A");
    assert_eq!(config.synthesis.max_chars_per_request, 5000);
    assert_eq!(config.synthesis.timeout_secs, 60);
    Ok(())
}

/// Validation requires an API key
#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let config = Config::default();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("API key"));
}

/// Validation rejects unknown voices
#[test]
fn test_validate_withUnknownVoice_shouldFail() {
    let mut config = common::test_config();
    config.synthesis.voice = "en-US-Imaginary-Z".to_string();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Unknown voice"));
}

/// Validation rejects a voice whose language disagrees with language_code
#[test]
fn test_validate_withMismatchedLanguage_shouldFail() {
    let mut config = common::test_config();
    config.synthesis.language_code = "fr-FR".to_string();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("belongs to language"));
}

/// Validation rejects a zero chunk size
#[test]
fn test_validate_withZeroChunkSize_shouldFail() {
    let mut config = common::test_config();
    config.synthesis.max_chars_per_request = 0;

    assert!(config.validate().is_err());
}

/// A fully specified test config passes validation
#[test]
fn test_validate_withTestConfig_shouldSucceed() {
    assert!(common::test_config().validate().is_ok());
}

/// Each encoding maps to its wire name and file extension
#[test]
fn test_audio_encoding_shouldMapNamesAndExtensions() {
    assert_eq!(AudioEncoding::Mp3.api_name(), "MP3");
    assert_eq!(AudioEncoding::Mp3.file_extension(), "mp3");
    assert_eq!(AudioEncoding::Linear16.api_name(), "LINEAR16");
    assert_eq!(AudioEncoding::Linear16.file_extension(), "wav");
    assert_eq!(AudioEncoding::OggOpus.api_name(), "OGG_OPUS");
    assert_eq!(AudioEncoding::OggOpus.file_extension(), "ogg");
}
