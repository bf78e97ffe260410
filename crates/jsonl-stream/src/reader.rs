//! JSONL reading operations.
//!
//! This module provides line-by-line reading of JSONL formatted data from any
//! [`std::io::Read`] source, with buffering and line number tracking for
//! error reporting.

use crate::warning::Warning;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{trace, warn};

/// Streaming reader for JSONL (JSON Lines) data.
///
/// `Reader` wraps a byte stream in a [`BufReader`] and consumes it one line
/// at a time, in order. Lines are separated by a single `\n` byte; the
/// delimiter is stripped, but a trailing `\r` is left as part of the payload
/// (no `\r\n` normalization, a format-preserving choice). A final line
/// without a trailing newline is still a line.
///
/// The reader tracks 1-based line numbers so decode failures can name the
/// offending line. It is single-pass: each operation resumes from wherever
/// the stream cursor currently is, and nothing is buffered across calls
/// beyond what line detection requires.
///
/// # Examples
///
/// ```
/// use jsonl_stream::Reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize)]
/// struct Event {
///     id: u32,
/// }
///
/// let input = Cursor::new("{\"id\":1}\n{\"id\":2}\n");
/// let mut reader = Reader::new(input);
///
/// let first: Event = reader.read_line()?.expect("a line");
/// assert_eq!(first.id, 1);
/// let second: Event = reader.read_line()?.expect("a line");
/// assert_eq!(second.id, 2);
/// assert!(reader.read_line::<Event>()?.is_none());
/// # Ok::<(), jsonl_stream::Error>(())
/// ```
pub struct Reader<R> {
    /// Buffered reader wrapping the underlying stream.
    reader: BufReader<R>,
    /// 1-based number of the last line read; 0 before any line is read.
    line_number: usize,
    /// Reused buffer holding the current line's payload, delimiter stripped.
    line: Vec<u8>,
    /// Optional cap on line length; lines growing past it fail explicitly.
    max_line_len: Option<usize>,
}

impl<R: Read> Reader<R> {
    /// Creates a new `Reader` wrapping the given byte stream.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            line: Vec::new(),
            max_line_len: None,
        }
    }

    /// Creates a new `Reader` with a custom buffer capacity.
    ///
    /// Useful when the typical line length of the data is known and buffer
    /// allocation should match it.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            line: Vec::new(),
            max_line_len: None,
        }
    }

    /// Caps the length of a single line at `limit` bytes.
    ///
    /// The internal line buffer normally grows to fit the line. With a cap
    /// set, a line growing past `limit` fails with [`Error::LineTooLong`]
    /// instead; the payload is never silently truncated.
    #[must_use]
    pub fn max_line_len(mut self, limit: usize) -> Self {
        self.max_line_len = Some(limit);
        self
    }

    /// Returns the 1-based line number of the last line read, or 0 before
    /// any line has been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads one line and deserializes its payload into `T`.
    ///
    /// Consumes exactly one line per call; a second call resumes from the
    /// next line, supporting incremental pull-style consumption. `Ok(None)`
    /// signals the natural end of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the line is not valid JSON for `T` (the
    /// line stays consumed, so subsequent reads are unaffected),
    /// [`Error::Io`] if the underlying read fails, or
    /// [`Error::LineTooLong`] if a configured cap is exceeded.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonl_stream::Reader;
    /// use std::io::Cursor;
    ///
    /// let mut reader = Reader::new(Cursor::new("[1,2,3]\n"));
    /// let values: Option<Vec<u32>> = reader.read_line()?;
    /// assert_eq!(values, Some(vec![1, 2, 3]));
    /// # Ok::<(), jsonl_stream::Error>(())
    /// ```
    pub fn read_line<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        if !self.fill_line()? {
            trace!(lines_read = self.line_number, "end of stream");
            return Ok(None);
        }
        let value = serde_json::from_slice(&self.line).map_err(|source| Error::Decode {
            line: self.line_number,
            source,
        })?;
        trace!(line = self.line_number, bytes = self.line.len(), "decoded line");
        Ok(Some(value))
    }

    /// Reads the stream to completion, invoking `callback` once per
    /// non-empty line, in order.
    ///
    /// The callback receives the raw, still-encoded payload bytes; deciding
    /// what shape a line is and how to decode it is entirely the callback's
    /// business. Blank (zero-byte) lines are skipped without invoking it.
    ///
    /// Reaching the end of the stream is success. The scan is single-pass
    /// and not restartable: a second call continues from the current stream
    /// position, which for an exhausted stream means zero invocations.
    ///
    /// # Errors
    ///
    /// If the callback returns an error, iteration stops immediately and the
    /// error is propagated as [`Error::Callback`], wrapped with the line
    /// number for context. Side effects of earlier invocations are kept.
    /// Underlying read failures surface as [`Error::Io`].
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonl_stream::Reader;
    /// use std::io::Cursor;
    ///
    /// let mut reader = Reader::new(Cursor::new("{\"a\":1}\n\n{\"a\":2}\n"));
    /// let mut seen = Vec::new();
    /// reader.read_lines(|line| -> Result<(), String> {
    ///     seen.push(line.to_vec());
    ///     Ok(())
    /// })?;
    /// assert_eq!(seen.len(), 2);
    /// # Ok::<(), jsonl_stream::Error>(())
    /// ```
    pub fn read_lines<F, E>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        while self.fill_line()? {
            if self.line.is_empty() {
                trace!(line = self.line_number, "skipping blank line");
                continue;
            }
            callback(&self.line).map_err(|source| Error::Callback {
                line: self.line_number,
                source: source.into(),
            })?;
        }
        Ok(())
    }

    /// Reads every remaining line, deserializing each into `T`.
    ///
    /// Blank lines are skipped. Stops at the first decode failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for the first malformed line, or
    /// [`Error::Io`] if the underlying read fails.
    pub fn read_all<T: DeserializeOwned>(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while self.fill_line()? {
            if self.line.is_empty() {
                continue;
            }
            let record = serde_json::from_slice(&self.line).map_err(|source| Error::Decode {
                line: self.line_number,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Reads every remaining line, collecting malformed or empty lines as
    /// [`Warning`]s instead of failing.
    ///
    /// Valid records are returned in stream order alongside the warnings, so
    /// a handful of corrupt lines does not make the rest of the stream
    /// unreachable.
    ///
    /// # Errors
    ///
    /// Only underlying read failures abort the scan, as [`Error::Io`] (or
    /// [`Error::LineTooLong`] when a cap is configured). Decode failures
    /// never do.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonl_stream::Reader;
    /// use std::io::Cursor;
    ///
    /// let input = Cursor::new("{\"id\":1}\nnot-json\n{\"id\":2}\n");
    /// let mut reader = Reader::new(input);
    /// let (records, warnings) = reader.read_resilient::<serde_json::Value>()?;
    /// assert_eq!(records.len(), 2);
    /// assert_eq!(warnings.len(), 1);
    /// assert_eq!(warnings[0].line_number(), 2);
    /// # Ok::<(), jsonl_stream::Error>(())
    /// ```
    pub fn read_resilient<T: DeserializeOwned>(&mut self) -> Result<(Vec<T>, Vec<Warning>)> {
        let mut records = Vec::new();
        let mut warnings = Vec::new();
        while self.fill_line()? {
            if self.line.is_empty() {
                warnings.push(Warning::SkippedLine {
                    line_number: self.line_number,
                    reason: "empty line".to_string(),
                });
                continue;
            }
            match serde_json::from_slice(&self.line) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(line = self.line_number, %error, "skipping malformed line");
                    warnings.push(Warning::MalformedJson {
                        line_number: self.line_number,
                        error: error.to_string(),
                    });
                }
            }
        }
        Ok((records, warnings))
    }

    /// Returns a reference to the underlying buffered reader.
    #[must_use]
    pub fn get_ref(&self) -> &BufReader<R> {
        &self.reader
    }

    /// Returns a mutable reference to the underlying buffered reader.
    ///
    /// Use with caution: reading directly from the buffer desynchronizes
    /// line number tracking.
    pub fn get_mut(&mut self) -> &mut BufReader<R> {
        &mut self.reader
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }

    /// Reads the next line into the internal buffer, stripping the `\n`
    /// delimiter. Returns `false` at end of stream.
    fn fill_line(&mut self) -> Result<bool> {
        self.line.clear();
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                if self.line.is_empty() {
                    return Ok(false);
                }
                // Final line without a trailing newline.
                self.line_number += 1;
                return Ok(true);
            }
            if let Some(pos) = available.iter().position(|&b| b == b'\n') {
                self.line.extend_from_slice(&available[..pos]);
                self.reader.consume(pos + 1);
                self.line_number += 1;
                self.check_line_len(self.line_number)?;
                return Ok(true);
            }
            let chunk_len = available.len();
            self.line.extend_from_slice(available);
            self.reader.consume(chunk_len);
            self.check_line_len(self.line_number + 1)?;
        }
    }

    fn check_line_len(&self, line: usize) -> Result<()> {
        match self.max_line_len {
            Some(limit) if self.line.len() > limit => Err(Error::LineTooLong { line, limit }),
            _ => Ok(()),
        }
    }
}

impl<R: Read + Default> Default for Reader<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

/// Reads a whole JSONL file into a `Vec<T>`, failing on the first malformed
/// line.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or
/// [`Error::Decode`] for the first line that does not deserialize into `T`.
pub fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = std::fs::File::open(path)?;
    Reader::new(file).read_all()
}

/// Reads a whole JSONL file, skipping malformed and empty lines and
/// reporting them as [`Warning`]s.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read. Malformed
/// lines never abort the read.
pub fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = std::fs::File::open(path)?;
    Reader::new(file).read_resilient()
}
