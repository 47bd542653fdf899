//! Windowed stream over a chunked source.
//!
//! This module provides [WindowedStream], a view over a byte range of a
//! [ChunkedSource] that caches at most one contiguous window of bytes. Runs of
//! small nearby reads (typical for header and field parsing) are served from
//! the window, while reads of at least `max_window` bytes (typical for bulk
//! payloads) are copied straight from the chunks and leave the window alone.

use bytes::{Bytes, BytesMut};
use log::{debug, trace};

use crate::config::DEFAULT_MAX_WINDOW;
use crate::source::ChunkedSource;
use crate::stream::binary_stream::{BinaryStream, requested_length};
use crate::stream::stream_error::{Result, StreamError};

// =#========================================================================#=
// WINDOW
// =#========================================================================#=
/// Cached bytes starting at an absolute offset of the source.
#[derive(Debug, Clone)]
struct Window {
    offset: u64,
    buffer: Bytes,
}

impl Window {
    #[inline]
    fn contains(&self, offset: u64, length: usize) -> bool {
        offset >= self.offset && offset + length as u64 <= self.offset + self.buffer.len() as u64
    }
}

// =#========================================================================#=
// WINDOWED STREAM
// =#========================================================================#=
/// A stream over `[start, start + length)` of a [ChunkedSource].
///
/// Reading needs `&mut self` because the cached window is replaced on
/// demand. Independent streams over the same source (including sub-streams
/// created with [stream](BinaryStream::stream)) share only the immutable
/// chunks and can be moved to other threads.
///
/// # Example
/// ```
/// use chunkstream::{BinaryStream, WindowedStream};
/// use chunkstream::source::ChunkedSource;
///
/// let source = ChunkedSource::from_bytes((0u8..10).collect::<Vec<_>>(), 4)?;
/// let mut stream = WindowedStream::new(source);
///
/// assert_eq!(stream.read(Some(3))?.as_ref(), &[0, 1, 2]);
/// assert_eq!(stream.peek(Some(2))?.as_ref(), &[3, 4]);
///
/// let mut child = stream.stream(4)?;
/// assert_eq!(child.read_to_end()?.as_ref(), &[3, 4, 5, 6]);
/// assert_eq!(stream.position(), 7);
/// # Ok::<(), chunkstream::StreamError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WindowedStream {
    source: ChunkedSource,
    /// Absolute offset of the stream origin
    start: u64,
    /// Logical length of the stream
    length: u64,
    /// Logical cursor
    position: u64,
    window: Option<Window>,
    /// Window size cap and bulk-read threshold
    max_window: usize,
}

impl WindowedStream {
    /// Creates a stream over the whole source with the default window size.
    pub fn new(source: ChunkedSource) -> Self {
        Self::with_max_window(source, DEFAULT_MAX_WINDOW)
    }

    /// Creates a stream over the whole source.
    ///
    /// # Arguments
    /// * `source` - The chunks to read from
    /// * `max_window` - Reads shorter than this are served from a cached
    ///   window of at most this many bytes, longer ones bypass the cache
    ///
    /// # Panics
    /// Panics if `max_window` is zero.
    pub fn with_max_window(source: ChunkedSource, max_window: usize) -> Self {
        assert!(max_window > 0, "max window must be greater than zero");
        let length = source.len();
        Self::view(source, 0, length, max_window)
    }

    fn view(source: ChunkedSource, start: u64, length: u64, max_window: usize) -> Self {
        Self {
            source,
            start,
            length,
            position: 0,
            window: None,
            max_window,
        }
    }

    /// Absolute offset of this stream's origin within the source.
    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn max_window(&self) -> usize {
        self.max_window
    }

    pub fn source(&self) -> &ChunkedSource {
        &self.source
    }

    /// Absolute offset and size of the cached window, if any.
    #[cfg(test)]
    pub(crate) fn window_span(&self) -> Option<(u64, usize)> {
        self.window
            .as_ref()
            .map(|window| (window.offset, window.buffer.len()))
    }

    /// Fails unless `length` bytes remain after the cursor.
    fn check_range(&self, length: u64) -> Result<()> {
        let end = self.position.saturating_add(length);
        if end > self.length {
            let missing = end - self.length;
            debug!(
                "Read of {} bytes at position {} overruns stream of length {} by {} bytes",
                length, self.position, self.length, missing
            );
            return Err(StreamError::out_of_range(self.position, missing));
        }
        Ok(())
    }

    /// Returns `length` bytes at the cursor without moving it.
    fn fetch(&mut self, length: usize) -> Result<Bytes> {
        self.check_range(length as u64)?;
        if length == 0 {
            return Ok(Bytes::new());
        }

        let offset = self.start + self.position;
        if length >= self.max_window {
            debug!("Bulk read of {} bytes at offset {}", length, offset);
            let mut buffer = BytesMut::zeroed(length);
            self.source.copy_into(&mut buffer, offset);
            return Ok(buffer.freeze());
        }

        let window = match self.window.take() {
            Some(window) if window.contains(offset, length) => window,
            _ => self.load_window(offset),
        };
        let begin = (offset - window.offset) as usize;
        let bytes = window.buffer.slice(begin..begin + length);
        self.window = Some(window);
        Ok(bytes)
    }

    /// Materializes as much of the stream from `offset` on as fits a window.
    fn load_window(&self, offset: u64) -> Window {
        let available = self.start + self.length - offset;
        let size = available.min(self.max_window as u64) as usize;
        trace!("Loading window at offset {} ({} bytes)", offset, size);
        Window {
            offset,
            buffer: self.source.read_range(offset, size),
        }
    }
}

impl From<ChunkedSource> for WindowedStream {
    fn from(source: ChunkedSource) -> Self {
        Self::new(source)
    }
}

impl BinaryStream for WindowedStream {
    #[inline]
    fn length(&self) -> u64 {
        self.length
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, position: i64) {
        self.position = if position >= 0 {
            position as u64
        } else {
            self.length.saturating_sub(position.unsigned_abs())
        };
    }

    fn skip(&mut self, offset: u64) -> Result<()> {
        let origin = self.position;
        self.position = self.position.saturating_add(offset);
        if self.position > self.length {
            let missing = self.position - self.length;
            debug!(
                "Skip of {} bytes at position {} overruns stream of length {} by {} bytes",
                offset, origin, self.length, missing
            );
            return Err(StreamError::out_of_range(origin, missing));
        }
        Ok(())
    }

    fn peek(&mut self, length: Option<usize>) -> Result<Bytes> {
        let length = requested_length(&*self, length);
        self.fetch(length)
    }

    fn read(&mut self, length: Option<usize>) -> Result<Bytes> {
        let length = requested_length(&*self, length);
        let bytes = self.fetch(length)?;
        self.position += length as u64;
        Ok(bytes)
    }

    fn byte(&mut self) -> Result<u8> {
        let bytes = self.fetch(1)?;
        self.position += 1;
        Ok(bytes[0])
    }

    fn stream(&mut self, length: u64) -> Result<Self> {
        let origin = self.start.saturating_add(self.position);
        let child = Self::view(self.source.clone(), origin, length, self.max_window);
        self.skip(length)?;
        debug!("Carved sub-stream of {} bytes at offset {}", length, origin);
        Ok(child)
    }
}
