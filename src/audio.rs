/*!
 * Audio assembly.
 *
 * Accumulates per-chunk audio buffers in chunk order and writes the result to
 * a single binary file. Ordering is the one structural invariant of this tool:
 * concatenated audio only plays back correctly when buffer order matches chunk
 * order.
 */

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// In-memory accumulator for synthesized audio
#[derive(Debug, Default)]
pub struct AudioAssembler {
    buffer: Vec<u8>,
    chunks_appended: usize,
}

impl AudioAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk's audio bytes.
    ///
    /// Must be called in chunk order; the assembler never reorders.
    pub fn append(&mut self, audio: &[u8]) {
        self.buffer.extend_from_slice(audio);
        self.chunks_appended += 1;
    }

    /// Total bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of chunk buffers appended
    pub fn chunks_appended(&self) -> usize {
        self.chunks_appended
    }

    /// Borrow the assembled bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Write the assembled audio to `path` in one binary write.
    ///
    /// Only called once every chunk has succeeded; a failed run leaves no
    /// partial file behind. Overwrite policy is decided by the caller before
    /// any synthesis request is spent.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        fs::write(path, &self.buffer)
            .with_context(|| format!("Failed to write audio file: {:?}", path))?;

        info!(
            "Created audio file {:?} ({} bytes from {} chunks)",
            path,
            self.buffer.len(),
            self.chunks_appended
        );
        Ok(())
    }
}
