//! Error types for chunked sources and binary streams.
//!
//! This module provides [StreamError] and [StreamErrorKind] for representing
//! and reporting errors that occur while assembling a
//! [ChunkedSource](crate::source::ChunkedSource) or reading from a stream.

use thiserror::Error;

// =#========================================================================#=
// STREAM ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur while assembling or reading a stream.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum StreamErrorKind {
    /// A requested byte range extends past the end of the view.
    #[error("Expected {missing} more bytes. The file might be corrupted. Unexpected end of file")]
    OutOfRange { missing: u64 },

    /// A chunk does not fit the fixed chunk layout.
    #[error("Chunk {index} has {len} bytes, but chunk size is {chunk_size}")]
    InvalidChunk {
        index: usize,
        len: usize,
        chunk_size: usize,
    },

    /// The declared total length exceeds the bytes actually held.
    #[error("Total length {total_length} exceeds the {available} bytes held by the chunks")]
    LengthExceedsChunks { total_length: u64, available: u64 },

    #[error("Invalid configuration - {0}")]
    InvalidConfig(String),

    #[error("IO error - {0}")]
    Io(String),
}

// =#========================================================================#=
// STREAM ERROR
// =#========================================================================#=
/// Stream error with the logical position at which it was detected.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
#[error("{kind} at position {position}")]
pub struct StreamError {
    kind: StreamErrorKind,
    position: u64,
}

impl StreamError {
    /// Create a StreamError from a kind and the position it was detected at
    pub fn new(kind: StreamErrorKind, position: u64) -> Self {
        Self { kind, position }
    }

    /// Convenience constructor for OutOfRange
    ///
    /// # Arguments
    /// * `position` - Logical position of the request that overran the view
    /// * `missing` - Number of bytes the view is short by
    pub fn out_of_range(position: u64, missing: u64) -> Self {
        Self::new(StreamErrorKind::OutOfRange { missing }, position)
    }

    /// Create a StreamError without a stream position (for construction errors)
    pub fn without_position(kind: StreamErrorKind) -> Self {
        Self::new(kind, 0)
    }

    /// Get the error kind
    pub fn kind(&self) -> &StreamErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of bytes a range request was short by, if this is an OutOfRange error.
    pub fn missing_bytes(&self) -> Option<u64> {
        match self.kind {
            StreamErrorKind::OutOfRange { missing } => Some(missing),
            _ => None,
        }
    }

    /// Returns `true` if the stream ran out of bytes.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, StreamErrorKind::OutOfRange { .. })
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        Self::without_position(StreamErrorKind::Io(err.to_string()))
    }
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, StreamError>;
