//! Error types for jsonl-stream operations.

use std::io;
use thiserror::Error;

/// The error type for jsonl-stream operations.
///
/// End of stream is not an error: [`Reader::read_line`](crate::Reader::read_line)
/// signals it with `Ok(None)` so that callers can treat exhaustion as expected
/// completion rather than a fault.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading, writing, or flushing the underlying
    /// stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line's payload was not valid JSON, or was valid JSON of the wrong
    /// shape for the requested target.
    ///
    /// The failing line stays consumed; subsequent reads resume at the next
    /// line.
    #[error("invalid JSON on line {line}: {source}")]
    Decode {
        /// The 1-based line number of the offending line.
        line: usize,
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },

    /// A value could not be serialized to JSON.
    ///
    /// Serialization happens before any bytes are written, so no partial line
    /// is ever emitted for this failure.
    #[error("could not serialize value to JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// A [`read_lines`](crate::Reader::read_lines) callback returned an error.
    ///
    /// Iteration stopped at the named line; the callback's error is carried
    /// verbatim as the source.
    #[error("line callback failed on line {line}: {source}")]
    Callback {
        /// The 1-based line number the callback was invoked with.
        line: usize,
        /// The error returned by the callback.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A line exceeded the configured maximum length.
    ///
    /// Raised instead of silently truncating when a
    /// [`max_line_len`](crate::Reader::max_line_len) cap is set.
    #[error("line {line} exceeds the maximum line length of {limit} bytes")]
    LineTooLong {
        /// The 1-based line number of the over-long line.
        line: usize,
        /// The configured cap, in bytes.
        limit: usize,
    },

    /// The underlying stream has no explicit close affordance.
    ///
    /// Informational rather than fatal: the stream is released when dropped,
    /// there was simply nothing to forward the close to.
    #[error("underlying stream is not closeable")]
    NotCloseable,
}

/// A specialized Result type for jsonl-stream operations.
pub type Result<T> = std::result::Result<T, Error>;
