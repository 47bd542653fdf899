//! The binary stream contract shared by every stream kind.
//!
//! This module provides the [BinaryStream] trait, which a format
//! deserializer can be written against regardless of whether the bytes come
//! from one contiguous buffer ([MemoryStream](crate::stream::MemoryStream))
//! or from many chunks ([WindowedStream](crate::stream::WindowedStream)).

use bytes::Bytes;

use crate::stream::stream_error::Result;

// =#========================================================================#=
// BINARY STREAM (Trait)
// =#========================================================================#=
/// Random-access reading over a logical byte range `[0, length)`.
///
/// Positions are logical: relative to the start of the stream, not to the
/// underlying file. Every range violation is reported as an
/// [OutOfRange](crate::stream::StreamErrorKind::OutOfRange) error carrying the
/// exact number of missing bytes. A stream that failed a bounds check is left
/// in an unspecified state and should be discarded.
pub trait BinaryStream {
    /// Logical length of the stream.
    fn length(&self) -> u64;

    /// Current cursor, in `[0, length]` for a healthy stream.
    fn position(&self) -> u64;

    /// Moves the cursor.
    ///
    /// A non-negative `position` is taken as is, a negative one counts back
    /// from the end (`-1` is the last byte). Nothing is checked here; a
    /// position past the end surfaces at the next read or skip.
    fn seek(&mut self, position: i64);

    /// Advances the cursor by `offset` bytes.
    ///
    /// # Errors
    /// Returns OutOfRange if the cursor ends up past the end. The cursor is
    /// not restored.
    fn skip(&mut self, offset: u64) -> Result<()>;

    /// Returns the next `length` bytes (all remaining bytes for `None`)
    /// without moving the cursor.
    ///
    /// # Errors
    /// Returns OutOfRange if fewer than `length` bytes remain.
    fn peek(&mut self, length: Option<usize>) -> Result<Bytes>;

    /// Returns the next `length` bytes (all remaining bytes for `None`)
    /// and advances the cursor past them.
    ///
    /// # Errors
    /// Returns OutOfRange if fewer than `length` bytes remain.
    fn read(&mut self, length: Option<usize>) -> Result<Bytes>;

    /// Reads a single byte.
    ///
    /// # Errors
    /// Returns OutOfRange at the end of the stream.
    fn byte(&mut self) -> Result<u8>;

    /// Carves the next `length` bytes off as an independent stream and
    /// advances this stream's cursor past them.
    ///
    /// # Errors
    /// Returns OutOfRange if fewer than `length` bytes remain.
    fn stream(&mut self, length: u64) -> Result<Self>
    where
        Self: Sized;

    /// Number of bytes between the cursor and the end (0 if past the end).
    fn remaining(&self) -> u64 {
        self.length().saturating_sub(self.position())
    }

    /// Check if at end of data.
    ///
    /// # Returns
    /// `true` if at or beyond the end of data, `false` otherwise
    fn is_eof(&self) -> bool {
        self.position() >= self.length()
    }

    /// Reads all remaining bytes.
    fn read_to_end(&mut self) -> Result<Bytes> {
        self.read(None)
    }

    /// Reads exactly `N` bytes into an array, e.g. for fixed-width header fields.
    ///
    /// # Example
    /// ```
    /// use chunkstream::{BinaryStream, MemoryStream};
    ///
    /// let mut stream = MemoryStream::from_vec(vec![0x2a, 0, 0, 0, 7]);
    /// let magic = u32::from_le_bytes(stream.read_array()?);
    /// assert_eq!(magic, 42);
    /// assert_eq!(stream.byte()?, 7);
    /// # Ok::<(), chunkstream::StreamError>(())
    /// ```
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]>
    where
        Self: Sized,
    {
        let bytes = self.read(Some(N))?;
        let mut array = [0u8; N];
        array.copy_from_slice(&bytes);
        Ok(array)
    }
}

/// Number of bytes a read of `length` asks for, defaulting to the rest of the stream.
pub(crate) fn requested_length<S: BinaryStream + ?Sized>(stream: &S, length: Option<usize>) -> usize {
    length.unwrap_or_else(|| usize::try_from(stream.remaining()).unwrap_or(usize::MAX))
}
