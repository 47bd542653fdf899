//! Configuration of chunk layout and window caching.

use crate::stream::{StreamError, StreamErrorKind};

/// Default size of a delivered chunk (256 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 0x1000_0000;

/// Default upper bound of a cached window (256 MiB).
///
/// Reads of at least this many bytes bypass the window entirely.
pub const DEFAULT_MAX_WINDOW: usize = 0x1000_0000;

// =#========================================================================#=
// STREAM CONFIG
// =#========================================================================#=
/// Settings used when loading a file into a chunked stream.
///
/// # Example
/// ```
/// use chunkstream::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_chunk_size(4096)
///     .with_max_window(1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Number of bytes per delivered chunk
    chunk_size: usize,
    /// Window size cap and bulk-read threshold
    max_window: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_window: DEFAULT_MAX_WINDOW,
        }
    }
}

impl StreamConfig {
    /// Sets the size of the chunks a file is read in.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the window threshold.
    ///
    /// Reads shorter than `max_window` are served from a cached window of
    /// at most `max_window` bytes; longer ones are copied directly.
    pub fn with_max_window(mut self, max_window: usize) -> Self {
        self.max_window = max_window;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Checks that both sizes are non-zero.
    ///
    /// # Errors
    /// Returns [StreamErrorKind::InvalidConfig] naming the offending setting.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.chunk_size == 0 {
            return Err(StreamError::without_position(StreamErrorKind::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            )));
        }
        if self.max_window == 0 {
            return Err(StreamError::without_position(StreamErrorKind::InvalidConfig(
                "max window must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }
}
