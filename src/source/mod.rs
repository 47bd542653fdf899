//! Chunk storage: the system of record for where each byte of a file lives.
//!
//! A [ChunkedSource] is assembled either all at once ([ChunkedSource::new]),
//! progressively as chunks arrive ([ChunkedSourceBuilder]), or by reading a
//! file or reader in bounded increments ([ChunkedSource::from_file],
//! [ChunkedSource::from_reader]).

pub mod builder;
pub mod chunked_source;
mod loader;

pub use builder::ChunkedSourceBuilder;
pub use chunked_source::{Chunk, ChunkedSource};
