//! Chunkstream is a library for random-access reading of large binary files
//! that are delivered as a sequence of fixed-size chunks.
//!
//! A file is never materialized as a whole. Instead its chunks are kept in a
//! shared [ChunkedSource](source::ChunkedSource) and read through streams
//! that seek, peek, read and skip over a logical byte range.
//! Core functionality provided:
//! - Chunked sources: assembled at once, progressively as chunks arrive
//!   ([ChunkedSourceBuilder](source::ChunkedSourceBuilder)), or by reading a
//!   file/reader in bounded increments.
//! - [WindowedStream]: a view over a byte range of a chunked source that
//!   caches at most one window of bytes.
//!   - Small reads are served from the window, which is reloaded at the
//!     cursor whenever a read falls outside of it.
//!   - Reads of at least `max_window` bytes bypass the window and copy
//!     straight from the chunks, so bulk payloads do not evict it.
//!   - Sub-streams partition a stream without copying any data.
//! - [MemoryStream]: the same contract over one contiguous buffer.
//! - [BinaryStream]: the shared contract a format deserializer is written against.
//!
//! Limitations:
//! - Read-only
//! - A single stream is not meant to be shared between callers; independent
//!   streams over one source are
//!
//! # Usage patterns
//! 1. Open a file with default settings via [open_file], or with custom
//!    chunk and window sizes via [open_file_with].
//! 2. Assemble a [ChunkedSource](source::ChunkedSource) yourself and wrap
//!    it into a [WindowedStream].
//!
//! ## Example
//!
//! ```
//! use chunkstream::source::ChunkedSourceBuilder;
//! use chunkstream::{BinaryStream, WindowedStream};
//!
//! let mut builder = ChunkedSourceBuilder::new(4);
//! builder.push(vec![0u8, 1, 2, 3])?;
//! builder.push(vec![4u8, 5, 6, 7])?;
//! builder.push(vec![8u8, 9])?;
//! let mut stream = WindowedStream::new(builder.build()?);
//!
//! assert_eq!(stream.read(Some(3))?.as_ref(), &[0, 1, 2]);
//! let mut payload = stream.stream(5)?;
//! assert_eq!(payload.read_to_end()?.as_ref(), &[3, 4, 5, 6, 7]);
//!
//! let err = stream.read(Some(3)).unwrap_err();
//! assert_eq!(err.missing_bytes(), Some(1));
//! # Ok::<(), chunkstream::StreamError>(())
//! ```
//!
//! ## Example File
//!
//! ```no_run
//! use chunkstream::{BinaryStream, StreamConfig, open_file_with};
//!
//! let config = StreamConfig::default().with_chunk_size(64 * 1024 * 1024);
//! let mut stream = open_file_with("model.bin", &config)?;
//! let magic = stream.read_array::<4>()?;
//! println!("magic {:?}, {} bytes left", magic, stream.remaining());
//! # Ok::<(), chunkstream::StreamError>(())
//! ```

pub mod config;
pub mod source;
pub mod stream;

pub use config::StreamConfig;
pub use stream::{
    BinaryStream, FileStream, MemoryStream, Result, StreamError, StreamErrorKind, WindowedStream,
};

use std::path::Path;

// ============================================================================
// Quick File API
// ============================================================================
/// Opens a file as a binary stream using default chunk and window sizes.
///
/// See [`open_file_with`] for details.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<FileStream> {
    open_file_with(path, &StreamConfig::default())
}

/// Opens a file as a binary stream.
///
/// The file is read in chunks of `config.chunk_size()`. If it fits into a
/// single chunk a [MemoryStream] is returned, otherwise a [WindowedStream]
/// with `config.max_window()` as window size.
///
/// # Errors
/// Returns an error if the configuration is invalid or the file cannot be read.
pub fn open_file_with<P: AsRef<Path>>(path: P, config: &StreamConfig) -> Result<FileStream> {
    FileStream::open(path, config)
}
