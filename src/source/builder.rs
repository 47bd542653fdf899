//! Progressive assembly of a [ChunkedSource] from chunks as they arrive.

use bytes::Bytes;
use log::trace;

use crate::source::chunked_source::{Chunk, ChunkedSource};
use crate::stream::{Result, StreamError, StreamErrorKind};

// =#========================================================================#=
// CHUNKED SOURCE BUILDER
// =#========================================================================#=
/// Collects chunks one at a time and freezes them into a [ChunkedSource].
///
/// Every chunk but the last must be exactly `chunk_size` long, so a chunk
/// shorter than that closes the builder for further pushes.
///
/// # Example
/// ```
/// use chunkstream::source::ChunkedSourceBuilder;
///
/// let mut builder = ChunkedSourceBuilder::new(4);
/// builder.push(vec![0u8, 1, 2, 3])?;
/// builder.push(vec![4u8, 5])?;
/// let source = builder.build()?;
/// assert_eq!(source.len(), 6);
/// # Ok::<(), chunkstream::StreamError>(())
/// ```
#[derive(Debug)]
pub struct ChunkedSourceBuilder {
    chunks: Vec<Chunk>,
    chunk_size: usize,
    /// Bytes received so far
    received: u64,
}

impl ChunkedSourceBuilder {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunks: Vec::new(),
            chunk_size,
            received: 0,
        }
    }

    /// Appends the next chunk of the file.
    ///
    /// # Errors
    /// * [StreamErrorKind::InvalidConfig] if the builder was created with a
    ///   chunk size of zero
    /// * [StreamErrorKind::InvalidChunk] if the chunk is longer than the
    ///   chunk size, or if the previously pushed chunk was short (and therefore
    ///   had to be the final one)
    pub fn push(&mut self, chunk: impl Into<Bytes>) -> Result<&mut Self> {
        if self.chunk_size == 0 {
            return Err(StreamError::without_position(StreamErrorKind::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            )));
        }
        let chunk = chunk.into();

        let short_tail = self
            .chunks
            .last()
            .map(|previous| previous.len())
            .filter(|&len| len != self.chunk_size);
        if let Some(len) = short_tail {
            return Err(StreamError::without_position(StreamErrorKind::InvalidChunk {
                index: self.chunks.len() - 1,
                len,
                chunk_size: self.chunk_size,
            }));
        }
        if chunk.len() > self.chunk_size {
            return Err(StreamError::without_position(StreamErrorKind::InvalidChunk {
                index: self.chunks.len(),
                len: chunk.len(),
                chunk_size: self.chunk_size,
            }));
        }

        self.received += chunk.len() as u64;
        trace!(
            "Received chunk {} ({} bytes, {} total)",
            self.chunks.len(),
            chunk.len(),
            self.received
        );
        self.chunks.push(chunk);
        Ok(self)
    }

    /// Number of bytes received so far.
    pub fn len(&self) -> u64 {
        self.received
    }

    pub fn is_empty(&self) -> bool {
        self.received == 0
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Freezes the chunks into a source addressing every received byte.
    ///
    /// # Errors
    /// Returns [StreamErrorKind::InvalidConfig] if the chunk size is zero,
    /// even when no chunk was pushed.
    pub fn build(self) -> Result<ChunkedSource> {
        let total_length = self.received;
        self.build_with_length(total_length)
    }

    /// Freezes the chunks into a source addressing the first `total_length` bytes.
    ///
    /// # Errors
    /// Returns [StreamErrorKind::LengthExceedsChunks] if fewer bytes were received.
    pub fn build_with_length(self, total_length: u64) -> Result<ChunkedSource> {
        ChunkedSource::new(self.chunks, self.chunk_size, total_length)
    }
}
