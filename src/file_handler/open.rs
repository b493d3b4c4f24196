//! Shared open-and-stat primitive.
//!
//! Every file-backed operation starts here: open read-only, fstat the
//! descriptor, and classify failure as "not found" versus any other OS error.

use crate::error::{FsError, Result};
use crate::file_handler::mtime::Mtime;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// An open read-only descriptor together with what fstat reported about it
#[derive(Debug)]
pub struct OpenFile {
    pub(crate) file: File,
    size: u64,
    mtime: Mtime,
    path: PathBuf,
}

impl OpenFile {
    /// Size in bytes as reported by fstat at open time
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mtime(&self) -> Mtime {
        self.mtime
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size as an in-memory length
    pub(crate) fn len(&self) -> Result<usize> {
        usize::try_from(self.size).map_err(|_| {
            FsError::os(
                &self.path,
                "File too large to address",
                io::Error::new(io::ErrorKind::Other, "size exceeds usize"),
            )
        })
    }

    /// Read exactly `size` bytes in one pass, then close the descriptor.
    ///
    /// A short read and a failed close are both reported as [`FsError::Os`].
    pub(crate) fn read_to_end_and_close(self) -> Result<Vec<u8>> {
        let len = self.len()?;
        let OpenFile { mut file, path, .. } = self;

        let mut buffer = vec![0u8; len];
        let read = file.read_exact(&mut buffer);
        let closed = close_descriptor(file);

        read.map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                FsError::os(&path, format!("Short read, expected {} bytes", len), e)
            }
            _ => FsError::os(&path, "Failed to read file", e),
        })?;
        closed.map_err(|e| FsError::os(&path, "Failed to close file", e))?;

        Ok(buffer)
    }
}

/// Open `path` read-only and stat the resulting descriptor.
///
/// # Errors
/// * [`FsError::Usage`] for an empty path or one containing NUL
/// * [`FsError::NotFound`] when open reports ENOENT
/// * [`FsError::Os`] for any other open or fstat failure
pub fn open_and_stat(path: &Path) -> Result<OpenFile> {
    if path.as_os_str().is_empty() {
        return Err(FsError::usage("a path is required"));
    }

    let file = File::open(path)
        .map_err(|e| FsError::from_io(path, "Failed to open file", e))?;

    // Descriptor is dropped (closed) on the error path.
    let metadata = file
        .metadata()
        .map_err(|e| FsError::os(path, "Failed to stat file", e))?;

    Ok(OpenFile {
        file,
        size: metadata.len(),
        mtime: Mtime::from_metadata(&metadata),
        path: path.to_path_buf(),
    })
}

/// Close a descriptor and report the result of close(2).
///
/// Dropping a `File` discards close errors; whole-file reads must surface them.
#[cfg(unix)]
pub(crate) fn close_descriptor(file: File) -> io::Result<()> {
    use std::os::unix::io::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: `fd` was just released from an owned `File`, so nothing else
    // will close it.
    if unsafe { libc::close(fd) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
pub(crate) fn close_descriptor(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}
