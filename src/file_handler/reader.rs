//! Whole-file reads.

use crate::error::Result;
use crate::file_handler::open::open_and_stat;
use crate::file_handler::policy::{MissingPolicy, Outcome};
use std::path::Path;

/// Read an entire file into a buffer sized exactly to its stat size.
///
/// # Returns
/// * `Some(bytes)` with the file content
/// * `None` if the file is missing and `ignore_missing` is set
///
/// # Errors
/// * [`FsError::NotFound`](crate::FsError::NotFound) when missing and not ignored
/// * [`FsError::Os`](crate::FsError::Os) for permission and I/O failures, a
///   short read, or a failed close
pub fn read_whole_file(path: impl AsRef<Path>, ignore_missing: bool) -> Result<Option<Vec<u8>>> {
    read_whole_file_with(path, MissingPolicy::ignore_or_raise(ignore_missing))
}

/// Like [`read_whole_file`] with an explicit policy.
///
/// [`MissingPolicy::Empty`] yields an empty buffer for a missing file.
pub fn read_whole_file_with(path: impl AsRef<Path>, missing: MissingPolicy) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    match missing.resolve(open_and_stat(path))? {
        Outcome::Found(opened) => {
            log::trace!("reading {} bytes from {}", opened.size(), path.display());
            opened.read_to_end_and_close().map(Some)
        }
        Outcome::Empty => Ok(Some(Vec::new())),
        Outcome::Absent => Ok(None),
    }
}
