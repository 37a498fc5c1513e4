use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::audio::AudioAssembler;
use crate::chunker;
use crate::document::Document;
use crate::errors::SynthesisError;
use crate::providers::{GoogleTts, TtsProvider};

// @module: Application controller for the document-to-speech pipeline

/// Where the raw text comes from.
///
/// File-based acquisition and direct text are genuinely separate entry points;
/// the direct path never touches the filesystem.
#[derive(Debug, Clone)]
pub enum TextSource {
    /// Read and extract text from a document on disk
    File(PathBuf),
    /// Text supplied directly (command line or prompt)
    Direct(String),
}

/// Explicit input state for one pipeline run.
///
/// Every knob the shell collects, whether from flags or prompts, lands here;
/// the pipeline reads nothing else.
#[derive(Debug, Clone)]
pub struct SpeakRequest {
    /// Text source for this run
    pub source: TextSource,
    /// Output basename; the encoding's extension is appended
    pub output_name: String,
    /// Also write the extracted text to a sibling .txt file
    pub export_text: bool,
    /// Overwrite an existing output file instead of refusing
    pub force_overwrite: bool,
    /// Open the produced file with the OS default handler on success
    pub play: bool,
}

/// Counters reported after a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Characters of raw text sent to the service
    pub characters_sent: usize,
    /// Synthesis requests issued (retries not counted)
    pub requests_sent: usize,
}

/// Main application controller for document-to-speech runs
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the full pipeline against the configured Google synthesis service
    pub async fn run(&self, request: SpeakRequest, cancel: Arc<AtomicBool>) -> Result<RunStats> {
        let provider = GoogleTts::new(&self.config.synthesis);
        self.run_with_provider(request, &provider, cancel).await
    }

    /// Run the pipeline with an explicit provider.
    ///
    /// Acquisition, chunking, sequential synthesis, assembly, write, optional
    /// playback handoff. The output file is touched only after every chunk has
    /// succeeded.
    pub async fn run_with_provider(
        &self,
        request: SpeakRequest,
        provider: &dyn TtsProvider,
        cancel: Arc<AtomicBool>,
    ) -> Result<RunStats> {
        let start_time = std::time::Instant::now();

        let output_path = self.output_path(&request.output_name);

        // Refuse to clobber before spending any quota
        if output_path.exists() && !request.force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output_path
            ));
        }

        // Acquire the raw text
        let raw_text = self.acquire_text(&request)?;

        if raw_text.is_empty() {
            return Err(anyhow!("No text to synthesize (input was empty)"));
        }

        let chunk_size = self.config.synthesis.max_chars_per_request;
        let total_chars = raw_text.chars().count();
        let total_chunks = chunker::chunk_count(total_chars, chunk_size);

        info!(
            "Synthesizing {} characters in {} chunk(s) with voice {}",
            total_chars, total_chunks, self.config.synthesis.voice
        );

        let progress_bar = ProgressBar::new(total_chunks as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg} {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar.set_message("Synthesizing");

        // Strictly sequential: one in-flight request at a time, buffers
        // appended in chunk order
        let mut assembler = AudioAssembler::new();
        let mut requests_sent = 0;

        for (index, chunk) in chunker::chunk_text(&raw_text, chunk_size).enumerate() {
            if cancel.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("Cancelled");
                return Err(SynthesisError::Cancelled {
                    completed_chunks: index,
                    total_chunks,
                }
                .into());
            }

            let audio = self
                .synthesize_with_retry(provider, chunk)
                .await
                .with_context(|| format!("Chunk {} of {} failed", index + 1, total_chunks))?;

            requests_sent += 1;
            assembler.append(&audio);
            progress_bar.set_position(requests_sent as u64);
        }

        progress_bar.finish_and_clear();

        // All chunks succeeded, the single write happens now
        assembler.write_to(&output_path)?;

        info!("Number of characters sent: {}", total_chars);
        info!("Number of requests sent: {}", requests_sent);
        info!(
            "Completed in {}",
            Self::format_duration(start_time.elapsed())
        );

        if request.play {
            debug!("Opening {:?} with the OS default handler", output_path);
            open::that(&output_path)
                .with_context(|| format!("Failed to open audio file: {:?}", output_path))?;
        }

        Ok(RunStats {
            characters_sent: total_chars,
            requests_sent,
        })
    }

    /// Resolve the output file path from the basename and configured encoding
    pub fn output_path(&self, output_name: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}.{}",
            output_name,
            self.config.synthesis.audio_encoding.file_extension()
        ))
    }

    /// Obtain raw text from the request's source.
    ///
    /// The optional text export only applies to file-based acquisition; direct
    /// text is already at hand for the operator.
    fn acquire_text(&self, request: &SpeakRequest) -> Result<String> {
        match &request.source {
            TextSource::File(path) => {
                let document = Document::sniff(path)?;
                info!("Processing file {:?}", path);

                let raw_text = document.extract_text()?;

                if request.export_text {
                    document.export_text(&raw_text)?;
                }

                Ok(raw_text)
            }
            TextSource::Direct(text) => {
                if request.export_text {
                    warn!("--export-text has no effect with direct text input");
                }
                Ok(text.clone())
            }
        }
    }

    /// Synthesize one chunk, retrying transient failures with doubling backoff.
    ///
    /// Non-transient errors and exhausted retries abort the run; accumulated
    /// audio is discarded by the caller since the output is only written after
    /// a fully successful pass.
    async fn synthesize_with_retry(
        &self,
        provider: &dyn TtsProvider,
        text: &str,
    ) -> Result<Vec<u8>, SynthesisError> {
        let retry_count = self.config.synthesis.retry_count;
        let mut backoff_ms = self.config.synthesis.retry_backoff_ms;

        let mut attempt = 0;
        loop {
            match provider.synthesize(text).await {
                Ok(audio) => return Ok(audio),
                Err(e) if e.is_transient() && attempt < retry_count => {
                    attempt += 1;
                    warn!(
                        "Transient synthesis failure (attempt {}/{}), retrying in {} ms: {}",
                        attempt,
                        retry_count + 1,
                        backoff_ms,
                        e
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = backoff_ms.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Format a duration for completion logging
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:01}s", total_secs, duration.subsec_millis() / 100)
        }
    }
}
