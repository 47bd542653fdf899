//! Binary streams over chunked and contiguous byte sources.
//!
//! This module provides the [BinaryStream] contract together with its
//! implementations: [WindowedStream] over a
//! [ChunkedSource](crate::source::ChunkedSource), [MemoryStream] over a single
//! buffer, and [FileStream] picking between the two when a file is opened.
//! All of them report range violations as [StreamError].

pub mod binary_stream;
pub mod file_stream;
pub mod memory_stream;
pub mod stream_error;
pub mod windowed_stream;

pub use binary_stream::BinaryStream;
pub use file_stream::FileStream;
pub use memory_stream::MemoryStream;
pub use stream_error::{Result, StreamError, StreamErrorKind};
pub use windowed_stream::WindowedStream;
