//! Backing store for line sources.
//!
//! A line source owns exactly one of: a read-only memory mapping (with the
//! descriptor it was made from kept open), or an owned buffer holding the
//! whole file (descriptor already closed).

use crate::error::{FsError, Result};
use crate::file_handler::open::{close_descriptor, OpenFile};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;

/// Files at least this large are memory-mapped; smaller ones are read into memory
pub const MMAP_THRESHOLD: u64 = 16 * 1024;

#[derive(Debug)]
pub enum ByteSource {
    /// Content read entirely into memory (files below the threshold)
    InMemory(Vec<u8>),
    /// Content accessed via memory mapping; the descriptor stays open until release
    MemoryMapped { mmap: Mmap, file: File },
}

impl ByteSource {
    /// Build the backing store for an opened file.
    ///
    /// Takes ownership of the descriptor. On every error path it has been
    /// closed by the time this returns.
    pub(crate) fn load(opened: OpenFile, mmap_threshold: u64) -> Result<Self> {
        if opened.size() < mmap_threshold {
            log::debug!(
                "buffering {} ({} bytes)",
                opened.path().display(),
                opened.size()
            );
            return opened.read_to_end_and_close().map(Self::InMemory);
        }

        let len = opened.len()?;
        // SAFETY: the mapping is read-only; callers accept that a concurrent
        // truncation of the underlying file is outside our control.
        let mmap = unsafe { MmapOptions::new().len(len).populate().map(&opened.file) }
            .map_err(|e| FsError::os(opened.path(), "Failed to memory map file", e))?;

        #[cfg(unix)]
        {
            if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
                log::warn!("Failed to set mmap advice for {}: {}", opened.path().display(), e);
            }
        }

        log::debug!("mapped {} ({} bytes)", opened.path().display(), len);
        Ok(Self::MemoryMapped {
            mmap,
            file: opened.file,
        })
    }

    /// Get the underlying bytes as a slice regardless of storage strategy
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteSource::InMemory(vec) => vec.as_slice(),
            ByteSource::MemoryMapped { mmap, .. } => &mmap[..],
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, ByteSource::MemoryMapped { .. })
    }

    /// Tear down the store: unmap then close, or free the buffer.
    ///
    /// Failures are logged and swallowed; there is nobody to report them to.
    pub(crate) fn release(self) {
        match self {
            ByteSource::InMemory(buffer) => drop(buffer),
            ByteSource::MemoryMapped { mmap, file } => {
                drop(mmap);
                if let Err(e) = close_descriptor(file) {
                    log::debug!("ignoring close failure during release: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_handler::open::open_and_stat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a test file with specified size
    fn create_test_file_with_size(size: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(&vec![b'x'; size])
            .expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_threshold_constant() {
        assert_eq!(MMAP_THRESHOLD, 16384);
    }

    #[test]
    fn test_boundary_file_sizes() {
        let small_file = create_test_file_with_size((MMAP_THRESHOLD - 1) as usize);
        let source = ByteSource::load(open_and_stat(small_file.path()).unwrap(), MMAP_THRESHOLD)
            .unwrap();
        match &source {
            ByteSource::InMemory(buffer) => assert_eq!(buffer.len(), 16383),
            _ => panic!("File below threshold should use InMemory variant"),
        }
        source.release();

        let large_file = create_test_file_with_size(MMAP_THRESHOLD as usize);
        let source = ByteSource::load(open_and_stat(large_file.path()).unwrap(), MMAP_THRESHOLD)
            .unwrap();
        assert!(source.is_mapped());
        assert_eq!(source.as_bytes().len(), 16384);
        source.release();
    }

    #[test]
    fn test_custom_threshold_forces_mapping() {
        let test_file = create_test_file_with_size(10);
        let source = ByteSource::load(open_and_stat(test_file.path()).unwrap(), 1).unwrap();
        assert!(source.is_mapped());
        assert_eq!(source.as_bytes(), b"xxxxxxxxxx");
    }
}
