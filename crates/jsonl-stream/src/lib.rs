//! A streaming JSONL (JSON Lines) reader and writer for Rust.
//!
//! Each line of the underlying byte stream is one independent JSON value,
//! separated by a single `\n`. [`Reader`] consumes any [`std::io::Read`]
//! source line by line; [`Writer`] emits serializable values to any
//! [`std::io::Write`] destination, one line per value, with optional prefix
//! framing and flush-on-demand delivery. The two sides are independent and
//! share nothing but the wire format.
//!
//! # Examples
//!
//! ```
//! use jsonl_stream::{Reader, Writer};
//! use serde::{Deserialize, Serialize};
//! use std::io::Cursor;
//!
//! #[derive(Debug, Serialize, Deserialize, PartialEq)]
//! struct Event {
//!     id: u32,
//!     kind: String,
//! }
//!
//! let event = Event { id: 7, kind: "created".to_string() };
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! writer.write(&event)?;
//!
//! let bytes = writer.into_inner().into_inner().unwrap().into_inner();
//! let mut reader = Reader::new(Cursor::new(bytes));
//! let read_back: Event = reader.read_line()?.expect("one line");
//! assert_eq!(read_back, event);
//! # Ok::<(), jsonl_stream::Error>(())
//! ```
//!
//! Lines carrying different shapes are told apart by a discriminator field
//! inside the payload, decoded once through a serde-tagged enum rather than
//! by sniffing bytes:
//!
//! ```
//! use jsonl_stream::Reader;
//! use serde::Deserialize;
//! use std::io::Cursor;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! #[serde(tag = "type")]
//! enum Record {
//!     Metric { value: f64 },
//!     Log { message: String },
//! }
//!
//! let input = Cursor::new(
//!     "{\"type\":\"Metric\",\"value\":1.5}\n{\"type\":\"Log\",\"message\":\"hi\"}\n",
//! );
//! let mut reader = Reader::new(input);
//! let records: Vec<Record> = reader.read_all()?;
//! assert_eq!(records.len(), 2);
//! # Ok::<(), jsonl_stream::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod stream;
pub mod warning;
pub mod writer;

pub use atomic::{write_jsonl_atomic, write_jsonl_atomic_iter};
pub use error::{Error, Result};
pub use reader::{read_jsonl, read_jsonl_resilient, Reader};
pub use stream::Closeable;
pub use warning::Warning;
pub use writer::Writer;
