//! The chunk store backing every windowed stream.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};

use crate::stream::{Result, StreamError, StreamErrorKind};

/// One physically delivered, immutable buffer of a file.
///
/// Cloning a chunk only bumps a reference count.
pub type Chunk = Bytes;

// =#========================================================================#=
// CHUNKED SOURCE
// =#========================================================================#=
/// An ordered sequence of equally sized chunks addressing one logical file.
///
/// All chunks hold exactly `chunk_size` bytes except the final one, which may
/// be shorter. The chunk list is shared and never mutated, so a source can
/// back any number of streams (and threads) without copying.
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use chunkstream::source::ChunkedSource;
///
/// let chunks = vec![
///     Bytes::from_static(&[0, 1, 2, 3]),
///     Bytes::from_static(&[4, 5, 6, 7]),
///     Bytes::from_static(&[8, 9]),
/// ];
/// let source = ChunkedSource::new(chunks, 4, 10).unwrap();
///
/// let mut buffer = [0u8; 4];
/// source.copy_into(&mut buffer, 2);
/// assert_eq!(buffer, [2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedSource {
    /// Chunks in file order
    chunks: Arc<[Chunk]>,
    /// Length of every chunk but the last
    chunk_size: usize,
    /// Number of addressable bytes
    total_length: u64,
}

impl ChunkedSource {
    /// Creates a source from chunks, their fixed size and the addressable length.
    ///
    /// # Arguments
    /// * `chunks` - Chunks in file order
    /// * `chunk_size` - Size of every chunk except possibly the last
    /// * `total_length` - Number of bytes streams may address
    ///
    /// # Errors
    /// * [StreamErrorKind::InvalidConfig] if `chunk_size` is zero
    /// * [StreamErrorKind::InvalidChunk] if a non-final chunk is not exactly
    ///   `chunk_size` long, or the final one is longer
    /// * [StreamErrorKind::LengthExceedsChunks] if `total_length` is more than
    ///   the chunks hold
    pub fn new(chunks: Vec<Chunk>, chunk_size: usize, total_length: u64) -> Result<Self> {
        if chunk_size == 0 {
            return Err(StreamError::without_position(StreamErrorKind::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            )));
        }

        let last = chunks.len().saturating_sub(1);
        let mut available = 0u64;
        for (index, chunk) in chunks.iter().enumerate() {
            let len = chunk.len();
            let fits = if index == last {
                len <= chunk_size
            } else {
                len == chunk_size
            };
            if !fits {
                return Err(StreamError::without_position(StreamErrorKind::InvalidChunk {
                    index,
                    len,
                    chunk_size,
                }));
            }
            available += len as u64;
        }

        if total_length > available {
            return Err(StreamError::without_position(
                StreamErrorKind::LengthExceedsChunks {
                    total_length,
                    available,
                },
            ));
        }

        Ok(Self {
            chunks: chunks.into(),
            chunk_size,
            total_length,
        })
    }

    /// Splits one contiguous buffer into chunks of `chunk_size` without copying.
    ///
    /// # Errors
    /// Returns [StreamErrorKind::InvalidConfig] if `chunk_size` is zero.
    pub fn from_bytes(bytes: impl Into<Bytes>, chunk_size: usize) -> Result<Self> {
        let bytes = bytes.into();
        if chunk_size == 0 {
            return Err(StreamError::without_position(StreamErrorKind::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            )));
        }

        let total_length = bytes.len() as u64;
        let chunks = (0..bytes.len())
            .step_by(chunk_size)
            .map(|begin| bytes.slice(begin..(begin + chunk_size).min(bytes.len())))
            .collect();
        Self::new(chunks, chunk_size, total_length)
    }

    /// Number of addressable bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        self.total_length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_length == 0
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Fills `target` with the bytes starting at absolute `offset`,
    /// crossing chunk boundaries as needed.
    ///
    /// The caller guarantees `offset + target.len() <= self.len()`;
    /// streams check their bounds before calling this.
    ///
    /// # Panics
    /// Panics if the requested range lies outside the chunks.
    pub fn copy_into(&self, target: &mut [u8], offset: u64) {
        debug_assert!(offset + target.len() as u64 <= self.total_length);
        if target.is_empty() {
            return;
        }

        let (mut index, mut intra) = self.locate(offset);
        let mut copied = 0;
        while copied < target.len() {
            let chunk = &self.chunks[index];
            let take = (chunk.len() - intra).min(target.len() - copied);
            target[copied..copied + take].copy_from_slice(&chunk[intra..intra + take]);
            copied += take;
            index += 1;
            intra = 0;
        }
    }

    /// Returns `len` bytes starting at absolute `offset`.
    ///
    /// A range inside a single chunk is returned as a slice of that chunk;
    /// anything spanning chunks is copied into a fresh buffer with one
    /// [copy_into](Self::copy_into) call.
    ///
    /// # Panics
    /// Panics if the requested range lies outside the chunks.
    pub fn read_range(&self, offset: u64, len: usize) -> Bytes {
        if len == 0 {
            return Bytes::new();
        }

        let (index, intra) = self.locate(offset);
        let chunk = &self.chunks[index];
        if intra + len <= chunk.len() {
            return chunk.slice(intra..intra + len);
        }

        let mut buffer = BytesMut::zeroed(len);
        self.copy_into(&mut buffer, offset);
        buffer.freeze()
    }

    /// Chunk index and offset within that chunk of an absolute offset.
    #[inline]
    fn locate(&self, offset: u64) -> (usize, usize) {
        let chunk_size = self.chunk_size as u64;
        let index = offset / chunk_size;
        (index as usize, (offset - index * chunk_size) as usize)
    }
}
