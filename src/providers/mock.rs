/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with index-tagged audio bytes
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::intermittent(n)` - Fails every nth request
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::SynthesisError;
use crate::providers::TtsProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with deterministic audio bytes
    Working,
    /// Fails intermittently (every nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Fails the first `fail_first` requests, then succeeds (retry testing)
    TransientThenWorking { fail_first: usize },
}

/// Mock provider for testing synthesis behavior.
///
/// Successful responses are index-tagged (`[audio:<n>:<len>]` as bytes) so
/// tests can verify ordering in the assembled output. Every request's text is
/// recorded for inspection.
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared with clones handed to the pipeline
    request_count: Arc<AtomicUsize>,
    /// Texts received, in call order
    received_texts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            received_texts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock that fails the first n requests with a transient error
    pub fn transient_then_working(fail_first: usize) -> Self {
        Self::new(MockBehavior::TransientThenWorking { fail_first })
    }

    /// Number of synthesize calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the texts received, in call order
    pub fn received_texts(&self) -> Vec<String> {
        self.received_texts.lock().unwrap().clone()
    }

    /// The deterministic audio bytes produced for the nth request (0-based)
    pub fn audio_for(index: usize, text_len: usize) -> Vec<u8> {
        format!("[audio:{}:{}]", index, text_len).into_bytes()
    }
}

#[async_trait]
impl TtsProvider for MockProvider {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let index = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.received_texts.lock().unwrap().push(text.to_string());

        match self.behavior {
            MockBehavior::Working => Ok(Self::audio_for(index, text.chars().count())),
            MockBehavior::Failing => Err(SynthesisError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && (index + 1) % fail_every == 0 {
                    Err(SynthesisError::RequestFailed(format!(
                        "mock intermittent failure on request {}",
                        index + 1
                    )))
                } else {
                    Ok(Self::audio_for(index, text.chars().count()))
                }
            }
            MockBehavior::TransientThenWorking { fail_first } => {
                if index < fail_first {
                    Err(SynthesisError::ConnectionError(format!(
                        "mock transient failure on request {}",
                        index + 1
                    )))
                } else {
                    Ok(Self::audio_for(index, text.chars().count()))
                }
            }
        }
    }
}
