//! Atomic write operations for JSONL files.
//!
//! On POSIX systems a rename within one filesystem is atomic. These helpers
//! exploit that to provide crash-safe whole-file writes: data goes to a
//! `.tmp` sibling first, is flushed and synced, and only then renamed over
//! the target path. A crash mid-write leaves the original file intact; at
//! worst a stale temp file is left behind.

use crate::writer::Writer;
use crate::Result;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Atomically writes a slice of values to a JSONL file.
///
/// Either every value reaches `path` or the file is left unchanged; the
/// target is never observed in a partially-written state.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, a value fails
/// to serialize, an I/O error occurs while writing, or the rename fails
/// (e.g. a cross-filesystem move). On failure the temporary file is removed
/// best-effort and the original file is untouched.
///
/// # Examples
///
/// ```no_run
/// use jsonl_stream::write_jsonl_atomic;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Record {
///     id: u32,
///     name: String,
/// }
///
/// let records = vec![
///     Record { id: 1, name: "Alice".to_string() },
///     Record { id: 2, name: "Bob".to_string() },
/// ];
/// write_jsonl_atomic("data.jsonl", &records)?;
/// # Ok::<(), jsonl_stream::Error>(())
/// ```
pub fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_jsonl_atomic_iter(path, values.iter())
}

/// Atomically writes an iterator of values to a JSONL file.
///
/// A more flexible form of [`write_jsonl_atomic`] for callers that want to
/// avoid collecting into a slice first.
///
/// # Errors
///
/// See [`write_jsonl_atomic`].
pub fn write_jsonl_atomic_iter<T, I, P>(path: P, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, values) {
        // Best-effort cleanup; the original file is untouched either way.
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path)?;
    debug!(path = %path.display(), "atomically replaced file");
    Ok(())
}

/// Builds the temp-file sibling for `path` by appending `.tmp` to its file
/// name, so `data.jsonl` becomes `data.jsonl.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("out"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes all values to the temp file, flushes, and syncs it to disk.
fn write_to_temp_file<T, I>(temp_path: &Path, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let file = File::create(temp_path)?;
    let mut writer = Writer::new(file);
    writer.write_all(values)?;
    writer.close()
}
