//! Opening files as binary streams.
//!
//! A file read in a single chunk is served by a [MemoryStream]; anything
//! larger is kept as chunks behind a [WindowedStream]. Both are wrapped in
//! [FileStream] so callers can treat them alike.

use std::path::Path;

use bytes::Bytes;
use log::debug;

use crate::config::StreamConfig;
use crate::source::ChunkedSource;
use crate::stream::binary_stream::BinaryStream;
use crate::stream::memory_stream::MemoryStream;
use crate::stream::stream_error::Result;
use crate::stream::windowed_stream::WindowedStream;

// =#========================================================================#=
// FILE STREAM
// =#========================================================================#=
/// A stream over a loaded file, contiguous or chunked.
#[derive(Debug, Clone)]
pub enum FileStream {
    /// The whole file fit in one chunk
    Memory(MemoryStream),
    /// The file spans several chunks
    Windowed(WindowedStream),
}

impl FileStream {
    /// Reads the file at `path` with the given chunk and window sizes.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the file cannot
    /// be read.
    pub fn open<P: AsRef<Path>>(path: P, config: &StreamConfig) -> Result<FileStream> {
        config.validate()?;
        let source = ChunkedSource::from_file(path, config.chunk_size())?;
        Self::from_source(source, config)
    }

    /// Wraps a source, unwrapping it into a [MemoryStream] if it holds at
    /// most one chunk. Only the window size of `config` is used here; the
    /// source already carries its chunk size.
    ///
    /// # Errors
    /// Returns [InvalidConfig](crate::stream::StreamErrorKind::InvalidConfig)
    /// if `config` fails [validate](StreamConfig::validate).
    pub fn from_source(source: ChunkedSource, config: &StreamConfig) -> Result<FileStream> {
        config.validate()?;
        if source.num_chunks() > 1 {
            debug!(
                "Using windowed stream over {} chunks ({} bytes)",
                source.num_chunks(),
                source.len()
            );
            return Ok(FileStream::Windowed(WindowedStream::with_max_window(
                source,
                config.max_window(),
            )));
        }

        let bytes = source
            .chunks()
            .first()
            .map(|chunk| chunk.slice(..source.len() as usize))
            .unwrap_or_else(Bytes::new);
        Ok(FileStream::Memory(MemoryStream::from_bytes(bytes)))
    }

    /// Returns `true` if the file is kept as chunks.
    pub fn is_windowed(&self) -> bool {
        matches!(self, FileStream::Windowed(_))
    }
}

impl BinaryStream for FileStream {
    fn length(&self) -> u64 {
        match self {
            FileStream::Memory(stream) => stream.length(),
            FileStream::Windowed(stream) => stream.length(),
        }
    }

    fn position(&self) -> u64 {
        match self {
            FileStream::Memory(stream) => stream.position(),
            FileStream::Windowed(stream) => stream.position(),
        }
    }

    fn seek(&mut self, position: i64) {
        match self {
            FileStream::Memory(stream) => stream.seek(position),
            FileStream::Windowed(stream) => stream.seek(position),
        }
    }

    fn skip(&mut self, offset: u64) -> Result<()> {
        match self {
            FileStream::Memory(stream) => stream.skip(offset),
            FileStream::Windowed(stream) => stream.skip(offset),
        }
    }

    fn peek(&mut self, length: Option<usize>) -> Result<Bytes> {
        match self {
            FileStream::Memory(stream) => stream.peek(length),
            FileStream::Windowed(stream) => stream.peek(length),
        }
    }

    fn read(&mut self, length: Option<usize>) -> Result<Bytes> {
        match self {
            FileStream::Memory(stream) => stream.read(length),
            FileStream::Windowed(stream) => stream.read(length),
        }
    }

    fn byte(&mut self) -> Result<u8> {
        match self {
            FileStream::Memory(stream) => stream.byte(),
            FileStream::Windowed(stream) => stream.byte(),
        }
    }

    fn stream(&mut self, length: u64) -> Result<Self> {
        match self {
            FileStream::Memory(stream) => stream.stream(length).map(FileStream::Memory),
            FileStream::Windowed(stream) => stream.stream(length).map(FileStream::Windowed),
        }
    }
}
