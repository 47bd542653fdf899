//! Reading files and readers into a [ChunkedSource] in bounded increments.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use log::debug;

use crate::source::builder::ChunkedSourceBuilder;
use crate::source::chunked_source::ChunkedSource;
use crate::stream::{Result, StreamError, StreamErrorKind};

impl ChunkedSource {
    /// Reads `reader` until EOF, one `chunk_size` chunk at a time.
    ///
    /// Short reads from the underlying reader are topped up, so every chunk
    /// except the last is full.
    ///
    /// # Errors
    /// Returns an IO error if reading fails, or
    /// [StreamErrorKind::InvalidConfig] if `chunk_size` is zero.
    pub fn from_reader<R: Read>(reader: R, chunk_size: usize) -> Result<ChunkedSource> {
        read_chunks(reader, chunk_size, None, StreamError::from)
    }

    /// Reads the file at `path` in chunks of `chunk_size`.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    /// * `chunk_size` - Number of bytes per chunk
    ///
    /// # Errors
    /// Returns an IO error naming `path` if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<ChunkedSource> {
        let path = path.as_ref();
        let to_error = |err: io::Error| file_error(path, err);
        let file = File::open(path).map_err(to_error)?;
        let size = file.metadata().map_err(to_error)?.len();
        debug!("Loading {} ({} bytes) in chunks of {}", path.display(), size, chunk_size);
        read_chunks(file, chunk_size, Some(size), to_error)
    }
}

/// Describes a failure to access the file at `path`.
fn file_error(path: &Path, err: io::Error) -> StreamError {
    let message = match err.kind() {
        ErrorKind::NotFound => format!("File not found '{}'", path.display()),
        ErrorKind::PermissionDenied => format!("File access denied '{}'", path.display()),
        ErrorKind::IsADirectory => format!("File not readable '{}'", path.display()),
        _ => format!("File read error '{}' - {}", path.display(), err),
    };
    StreamError::without_position(StreamErrorKind::Io(message))
}

/// Splits everything `reader` yields into chunks.
///
/// `size_hint` only bounds buffer preallocation; `to_error` converts read failures.
fn read_chunks<R: Read>(
    mut reader: R,
    chunk_size: usize,
    size_hint: Option<u64>,
    to_error: impl Fn(io::Error) -> StreamError,
) -> Result<ChunkedSource> {
    if chunk_size == 0 {
        return Err(StreamError::without_position(StreamErrorKind::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        )));
    }

    let mut builder = ChunkedSourceBuilder::new(chunk_size);
    loop {
        let capacity = match size_hint {
            Some(size) => (size.saturating_sub(builder.len()) as usize).min(chunk_size),
            None => 0,
        };
        let mut buffer = Vec::with_capacity(capacity);
        (&mut reader)
            .take(chunk_size as u64)
            .read_to_end(&mut buffer)
            .map_err(&to_error)?;

        if buffer.is_empty() {
            break;
        }
        let full = buffer.len() == chunk_size;
        builder.push(buffer)?;
        if !full {
            break;
        }
    }

    debug!("Loaded {} bytes in {} chunks", builder.len(), builder.num_chunks());
    builder.build()
}
