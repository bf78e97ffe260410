//! JSONL writing operations.
//!
//! This module provides line-by-line emission of serializable values to any
//! [`std::io::Write`] destination, with optional per-line prefix framing and
//! flush-on-demand delivery.

use crate::stream::Closeable;
use crate::{Error, Result};
use serde::Serialize;
use std::io::{BufWriter, Write};
use tracing::trace;

/// Streaming writer for JSONL (JSON Lines) data.
///
/// `Writer` serializes each value to a single JSON line and emits it to the
/// destination as `<prefix><json-payload>\n`. The prefix is fixed at
/// construction time and empty by default; it is opaque framing bytes, not
/// part of the JSON payload, so a line with a prefix is not guaranteed to be
/// valid JSON as a whole. This is intentional, e.g. `"data: "` for
/// Server-Sent-Events style transports.
///
/// Every successful [`write`](Self::write) ends with a flush so that
/// push-style transports deliver each line immediately instead of sitting in
/// a buffer.
///
/// # Examples
///
/// ```
/// use jsonl_stream::Writer;
/// use serde::Serialize;
/// use std::io::Cursor;
///
/// #[derive(Serialize)]
/// struct Event {
///     id: u32,
/// }
///
/// let mut writer = Writer::new(Cursor::new(Vec::new()));
/// writer.write(&Event { id: 1 })?;
/// writer.write(&Event { id: 2 })?;
///
/// let bytes = writer.into_inner().into_inner().unwrap().into_inner();
/// assert_eq!(bytes, b"{\"id\":1}\n{\"id\":2}\n");
/// # Ok::<(), jsonl_stream::Error>(())
/// ```
pub struct Writer<W: Write> {
    /// Buffered writer wrapping the underlying stream.
    writer: BufWriter<W>,
    /// Opaque bytes prepended to every line; empty means no framing.
    prefix: Vec<u8>,
}

impl<W: Write> Writer<W> {
    /// Creates a new `Writer` wrapping the given byte stream.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            prefix: Vec::new(),
        }
    }

    /// Creates a new `Writer` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, writer),
            prefix: Vec::new(),
        }
    }

    /// Sets the prefix prepended to every emitted line.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonl_stream::Writer;
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new())).prefix("data: ");
    /// writer.write(&42)?;
    ///
    /// let bytes = writer.into_inner().into_inner().unwrap().into_inner();
    /// assert_eq!(bytes, b"data: 42\n");
    /// # Ok::<(), jsonl_stream::Error>(())
    /// ```
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<Vec<u8>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Serializes `value` and emits it as one line, then flushes.
    ///
    /// The value is serialized before any bytes are written, so an encode
    /// failure never leaves a partial line on the stream. On success the
    /// destination is flushed unconditionally; flush failures are surfaced
    /// like any other I/O failure rather than swallowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `value` cannot be represented as JSON,
    /// or [`Error::Io`] if writing or flushing fails. An I/O failure aborts
    /// the line immediately without attempting the remaining write steps.
    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        self.write_line(value)?;
        self.flush()
    }

    /// Serializes each value from `values` as its own line, flushing once at
    /// the end.
    ///
    /// Stops at the first failure; lines already emitted stay emitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] or [`Error::Io`] for the first value that
    /// fails, with the same per-line semantics as [`write`](Self::write).
    pub fn write_all<T, I>(&mut self, values: I) -> Result<()>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.write_line(&value)?;
        }
        self.flush()
    }

    /// Flushes buffered bytes through to the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes, then forwards the close to the underlying stream.
    ///
    /// Only available when the destination declares the [`Closeable`]
    /// capability. Streams without a real close affordance report
    /// [`Error::NotCloseable`], which signals "nothing to do" rather than a
    /// fault; the stream is still released on drop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the flush or the close fails, or
    /// [`Error::NotCloseable`] as described above.
    pub fn close(&mut self) -> Result<()>
    where
        W: Closeable,
    {
        self.writer.flush()?;
        self.writer.get_mut().close()
    }

    /// Returns a reference to the underlying buffered writer.
    #[must_use]
    pub fn get_ref(&self) -> &BufWriter<W> {
        &self.writer
    }

    /// Returns a mutable reference to the underlying buffered writer.
    ///
    /// Use with caution: writing directly to the buffer can produce
    /// malformed JSONL output.
    pub fn get_mut(&mut self) -> &mut BufWriter<W> {
        &mut self.writer
    }

    /// Consumes the writer, returning the underlying buffered writer.
    ///
    /// This does not flush; call [`flush`](Self::flush) first to make sure
    /// every line has reached the stream.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }

    /// Serializes and emits one line without flushing: prefix bytes if any,
    /// then the JSON payload, then a single `\n`.
    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let payload = serde_json::to_vec(value).map_err(Error::Encode)?;
        if !self.prefix.is_empty() {
            self.writer.write_all(&self.prefix)?;
        }
        self.writer.write_all(&payload)?;
        self.writer.write_all(b"\n")?;
        trace!(bytes = payload.len(), prefixed = !self.prefix.is_empty(), "wrote line");
        Ok(())
    }
}

impl<W: Write + Default> Default for Writer<W> {
    fn default() -> Self {
        Self::new(W::default())
    }
}
