/*!
 * Fixed-size text chunking.
 *
 * Splits extracted text into contiguous chunks bounded by the synthesis
 * service's per-request character limit. Chunks cover the whole input in
 * ascending order with no overlap and no gaps; the final chunk may be shorter.
 */

/// Lazy iterator over fixed-size character chunks of a string slice.
///
/// Boundaries are counted in characters, not bytes, so multi-byte UTF-8
/// sequences are never split. One pass only; the offset state is local to the
/// iterator.
pub struct TextChunker<'a> {
    remaining: &'a str,
    chunk_size: usize,
}

impl<'a> TextChunker<'a> {
    /// Create a chunker over `text` with the given maximum characters per chunk
    pub fn new(text: &'a str, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be greater than zero");
        Self {
            remaining: text,
            chunk_size,
        }
    }
}

impl<'a> Iterator for TextChunker<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.remaining.is_empty() {
            return None;
        }

        // Find the byte offset of the chunk_size-th character, or take the rest
        let split_at = self
            .remaining
            .char_indices()
            .nth(self.chunk_size)
            .map(|(byte_index, _)| byte_index)
            .unwrap_or(self.remaining.len());

        let (chunk, rest) = self.remaining.split_at(split_at);
        self.remaining = rest;
        Some(chunk)
    }
}

/// Chunk `text` into pieces of at most `chunk_size` characters
pub fn chunk_text(text: &str, chunk_size: usize) -> TextChunker<'_> {
    TextChunker::new(text, chunk_size)
}

/// Number of chunks a text of `char_count` characters will produce
pub fn chunk_count(char_count: usize, chunk_size: usize) -> usize {
    char_count.div_ceil(chunk_size)
}
