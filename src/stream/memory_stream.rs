//! In-memory implementation of a binary stream.

use bytes::Bytes;
use log::debug;

use crate::stream::binary_stream::{BinaryStream, requested_length};
use crate::stream::stream_error::{Result, StreamError};

// =#========================================================================#=
// MEMORY STREAM
// =#========================================================================#=
/// A binary stream over one contiguous buffer.
///
/// This is the most efficient stream for files that arrive in a single
/// chunk: every read and every sub-stream is a slice of the same buffer.
#[derive(Debug, Clone)]
pub struct MemoryStream {
    /// The shared byte data being read
    buffer: Bytes,
    /// Current position in the buffer
    position: u64,
}

impl MemoryStream {
    /// Creates a new memory stream over `bytes` without copying.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            buffer: bytes.into(),
            position: 0,
        }
    }

    /// Creates a new memory stream from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to read
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }

    /// Returns the underlying buffer.
    pub fn as_bytes(&self) -> &Bytes {
        &self.buffer
    }

    fn check_range(&self, length: u64) -> Result<()> {
        let end = self.position.saturating_add(length);
        let total = self.length();
        if end > total {
            debug!(
                "Read of {} bytes at position {} overruns buffer of length {}",
                length, self.position, total
            );
            return Err(StreamError::out_of_range(self.position, end - total));
        }
        Ok(())
    }

    #[inline]
    fn slice(&self, length: usize) -> Bytes {
        let begin = self.position as usize;
        self.buffer.slice(begin..begin + length)
    }
}

impl BinaryStream for MemoryStream {
    #[inline]
    fn length(&self) -> u64 {
        self.buffer.len() as u64
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, position: i64) {
        self.position = if position >= 0 {
            position as u64
        } else {
            self.length().saturating_sub(position.unsigned_abs())
        };
    }

    fn skip(&mut self, offset: u64) -> Result<()> {
        let origin = self.position;
        self.position = self.position.saturating_add(offset);
        let total = self.length();
        if self.position > total {
            return Err(StreamError::out_of_range(origin, self.position - total));
        }
        Ok(())
    }

    fn peek(&mut self, length: Option<usize>) -> Result<Bytes> {
        let length = requested_length(&*self, length);
        self.check_range(length as u64)?;
        Ok(self.slice(length))
    }

    fn read(&mut self, length: Option<usize>) -> Result<Bytes> {
        let length = requested_length(&*self, length);
        self.check_range(length as u64)?;
        let bytes = self.slice(length);
        self.position += length as u64;
        Ok(bytes)
    }

    #[inline]
    fn byte(&mut self) -> Result<u8> {
        self.check_range(1)?;
        let byte = self.buffer[self.position as usize];
        self.position += 1;
        Ok(byte)
    }

    fn stream(&mut self, length: u64) -> Result<Self> {
        let origin = self.position as usize;
        self.skip(length)?;
        Ok(Self::from_bytes(
            self.buffer.slice(origin..origin + length as usize),
        ))
    }
}
