/*!
 * Speech synthesis provider clients.
 *
 * This module contains the provider trait and client implementations:
 * - `google`: Google Cloud Text-to-Speech v1 REST client
 * - `mock`: Deterministic in-memory provider for testing
 */

use async_trait::async_trait;

use crate::errors::SynthesisError;

pub mod google;
pub mod mock;

pub use google::GoogleTts;
pub use mock::MockProvider;

/// A speech synthesis backend.
///
/// One call converts one chunk of text into an audio byte buffer using the
/// voice and encoding the client was configured with. Calls are issued
/// strictly sequentially by the pipeline; implementations need no internal
/// ordering guarantees beyond answering one request at a time.
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize one chunk of text into audio bytes
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}
