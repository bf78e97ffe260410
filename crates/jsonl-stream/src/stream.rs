//! Capability traits for the underlying byte streams.
//!
//! Optional stream capabilities are declared explicitly by the concrete
//! stream type instead of being probed at runtime. Flushing needs no trait
//! of its own because every [`std::io::Write`] already exposes it; closing
//! does, because `std::io` has no close affordance beyond dropping.

use crate::{Error, Result};
use std::fs::File;
use std::io::{Cursor, Empty, Sink};
use std::net::{Shutdown, TcpStream};

/// An output stream that may support an explicit close.
///
/// The provided default reports [`Error::NotCloseable`], which in-memory
/// streams keep: there is nothing to forward the close to, and the stream is
/// released when dropped. Types with a real close affordance override it.
///
/// # Examples
///
/// ```
/// use jsonl_stream::{Closeable, Error};
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::<u8>::new());
/// assert!(matches!(buffer.close(), Err(Error::NotCloseable)));
/// ```
pub trait Closeable {
    /// Closes the stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotCloseable`] if the stream has no explicit close
    /// affordance, or [`Error::Io`] if the close itself fails.
    fn close(&mut self) -> Result<()> {
        Err(Error::NotCloseable)
    }
}

impl Closeable for File {
    /// Syncs all OS-buffered data to disk. The file handle itself is
    /// released on drop.
    fn close(&mut self) -> Result<()> {
        self.sync_all()?;
        Ok(())
    }
}

impl Closeable for TcpStream {
    fn close(&mut self) -> Result<()> {
        self.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

impl<T> Closeable for Cursor<T> {}

impl Closeable for Vec<u8> {}

impl Closeable for Sink {}

impl Closeable for Empty {}

impl<C: Closeable + ?Sized> Closeable for &mut C {
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<C: Closeable + ?Sized> Closeable for Box<C> {
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
