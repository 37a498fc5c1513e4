/*!
 * End-to-end pipeline tests against the mock provider.
 *
 * These exercise the full acquisition -> chunking -> synthesis -> assembly ->
 * write path without any network access.
 */

use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lectura::app_controller::{Controller, SpeakRequest, TextSource};
use lectura::providers::MockProvider;

use crate::common;

fn no_cancel() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

fn file_request(path: PathBuf, output_name: String) -> SpeakRequest {
    SpeakRequest {
        source: TextSource::File(path),
        output_name,
        export_text: false,
        force_overwrite: false,
        play: false,
    }
}

/// A 3-character file produces exactly one request and one chunk of audio
#[tokio::test]
async fn test_run_withThreeCharFile_shouldIssueSingleRequest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "tiny.txt", "abc")?;
    let output_name = temp_dir.path().join("tiny").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let stats = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await?;

    assert_eq!(stats.characters_sent, 3);
    assert_eq!(stats.requests_sent, 1);
    assert_eq!(provider.request_count(), 1);

    let written = std::fs::read(format!("{}.mp3", output_name))?;
    assert_eq!(written, MockProvider::audio_for(0, 3));
    Ok(())
}

/// 12000 characters split into requests of 5000, 5000 and 2000
#[tokio::test]
async fn test_run_with12000CharFile_shouldIssueThreeRequests() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "long.txt", &"z".repeat(12_000))?;
    let output_name = temp_dir.path().join("long").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let stats = controller
        .run_with_provider(file_request(input, output_name), &provider, no_cancel())
        .await?;

    assert_eq!(stats.characters_sent, 12_000);
    assert_eq!(stats.requests_sent, 3);

    let sizes: Vec<usize> = provider
        .received_texts()
        .iter()
        .map(|t| t.chars().count())
        .collect();
    assert_eq!(sizes, vec![5000, 5000, 2000]);
    Ok(())
}

/// Per-chunk buffers land in the output file in chunk order
#[tokio::test]
async fn test_run_withMultipleChunks_shouldAssembleInChunkOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "ordered.txt", &"q".repeat(25))?;
    let output_name = temp_dir.path().join("ordered").to_string_lossy().to_string();

    // Chunk size 10 -> chunks of 10, 10 and 5 characters
    let controller = Controller::with_config(common::test_config_with_chunk_size(10))?;
    let provider = MockProvider::working();

    controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await?;

    let mut expected = Vec::new();
    expected.extend(MockProvider::audio_for(0, 10));
    expected.extend(MockProvider::audio_for(1, 10));
    expected.extend(MockProvider::audio_for(2, 5));

    assert_eq!(std::fs::read(format!("{}.mp3", output_name))?, expected);
    Ok(())
}

/// An unsupported file type aborts before any synthesis request or file write
#[tokio::test]
async fn test_run_withDocxFile_shouldFailBeforeAnyRequest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "report.docx", "not supported")?;
    let output_name = temp_dir.path().join("report").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let result = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unsupported file type"));
    assert_eq!(provider.request_count(), 0);
    assert!(!PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// A synthesis failure aborts the run and leaves no output file behind
#[tokio::test]
async fn test_run_withFailingProvider_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doomed.txt", &"w".repeat(30))?;
    let output_name = temp_dir.path().join("doomed").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config_with_chunk_size(10))?;
    let provider = MockProvider::failing();

    let result = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await;

    assert!(result.is_err());
    assert!(!PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// A mid-run failure discards the chunks that had already succeeded
#[tokio::test]
async fn test_run_withMidRunFailure_shouldDiscardPartialAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "partial.txt", &"p".repeat(30))?;
    let output_name = temp_dir.path().join("partial").to_string_lossy().to_string();

    // Three chunks; the third request fails (non-transient, so no retry)
    let controller = Controller::with_config(common::test_config_with_chunk_size(10))?;
    let provider = MockProvider::intermittent(3);

    let result = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await;

    assert!(result.is_err());
    assert_eq!(provider.request_count(), 3);
    assert!(!PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// Transient failures are retried with backoff until the chunk succeeds
#[tokio::test]
async fn test_run_withTransientFailure_shouldRetryAndSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "flaky.txt", "abc")?;
    let output_name = temp_dir.path().join("flaky").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::transient_then_working(1);

    let stats = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await?;

    // One chunk, but two provider calls: the failed attempt plus the retry
    assert_eq!(stats.requests_sent, 1);
    assert_eq!(provider.request_count(), 2);
    assert!(PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// Exhausted retries surface the last transient error
#[tokio::test]
async fn test_run_withPersistentTransientFailure_shouldExhaustRetries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "down.txt", "abc")?;
    let output_name = temp_dir.path().join("down").to_string_lossy().to_string();

    let mut config = common::test_config();
    config.synthesis.retry_count = 2;
    let controller = Controller::with_config(config)?;
    // Fails more times than the retry budget allows
    let provider = MockProvider::transient_then_working(10);

    let result = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await;

    assert!(result.is_err());
    // Initial attempt plus two retries
    assert_eq!(provider.request_count(), 3);
    assert!(!PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// Without --force-overwrite an existing output is refused before any request
#[tokio::test]
async fn test_run_withExistingOutput_shouldRefuseWithoutForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "again.txt", "abc")?;
    let output_name = temp_dir.path().join("again").to_string_lossy().to_string();
    std::fs::write(format!("{}.mp3", output_name), b"previous run")?;

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let result = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, no_cancel())
        .await;

    assert!(result.is_err());
    assert_eq!(provider.request_count(), 0);
    assert_eq!(std::fs::read(format!("{}.mp3", output_name))?, b"previous run");
    Ok(())
}

/// With --force-overwrite a second run replaces the file with the latest audio
#[tokio::test]
async fn test_run_withForceOverwrite_shouldReflectLatestRun() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_name = temp_dir.path().join("twice").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;

    let first_input = common::create_test_file(temp_dir.path(), "v1.txt", "first version")?;
    let provider_one = MockProvider::working();
    let mut request = file_request(first_input, output_name.clone());
    request.force_overwrite = true;
    controller
        .run_with_provider(request, &provider_one, no_cancel())
        .await?;

    let second_input = common::create_test_file(temp_dir.path(), "v2.txt", "second")?;
    let provider_two = MockProvider::working();
    let mut request = file_request(second_input, output_name.clone());
    request.force_overwrite = true;
    controller
        .run_with_provider(request, &provider_two, no_cancel())
        .await?;

    assert_eq!(
        std::fs::read(format!("{}.mp3", output_name))?,
        MockProvider::audio_for(0, 6)
    );
    Ok(())
}

/// Direct text input bypasses file acquisition entirely
#[tokio::test]
async fn test_run_withDirectText_shouldSynthesizeWithoutFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_name = temp_dir.path().join("direct").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let request = SpeakRequest {
        source: TextSource::Direct("spoken directly".to_string()),
        output_name: output_name.clone(),
        export_text: false,
        force_overwrite: false,
        play: false,
    };

    let stats = controller
        .run_with_provider(request, &provider, no_cancel())
        .await?;

    assert_eq!(stats.characters_sent, 15);
    assert_eq!(provider.received_texts(), vec!["spoken directly".to_string()]);
    assert!(PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// Empty direct text is rejected instead of issuing zero-chunk runs
#[tokio::test]
async fn test_run_withEmptyText_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_name = temp_dir.path().join("empty").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let request = SpeakRequest {
        source: TextSource::Direct(String::new()),
        output_name,
        export_text: false,
        force_overwrite: false,
        play: false,
    };

    let result = controller
        .run_with_provider(request, &provider, no_cancel())
        .await;

    assert!(result.is_err());
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// A pre-set cancellation flag stops the run before the first request
#[tokio::test]
async fn test_run_withCancelledFlag_shouldAbortBeforeRequests() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "halt.txt", "abc")?;
    let output_name = temp_dir.path().join("halt").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();
    let cancel = Arc::new(AtomicBool::new(false));
    cancel.store(true, Ordering::SeqCst);

    let result = controller
        .run_with_provider(file_request(input, output_name.clone()), &provider, cancel)
        .await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("cancelled"));
    assert_eq!(provider.request_count(), 0);
    assert!(!PathBuf::from(format!("{}.mp3", output_name)).exists());
    Ok(())
}

/// The export flag writes the extracted text next to the input file
#[tokio::test]
async fn test_run_withExportText_shouldWriteSiblingTxt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "source.md", "exported body")?;
    let output_name = temp_dir.path().join("audio").to_string_lossy().to_string();

    let controller = Controller::with_config(common::test_config())?;
    let provider = MockProvider::working();

    let mut request = file_request(input, output_name);
    request.export_text = true;
    controller
        .run_with_provider(request, &provider, no_cancel())
        .await?;

    let exported = temp_dir.path().join("source.txt");
    assert_eq!(std::fs::read_to_string(exported)?, "exported body");
    Ok(())
}
