//! File access primitives: open-and-stat, whole-file reads, and line sources.
//!
//! Every operation here is synchronous. The async wrappers at the bottom run
//! the blocking section (open, stat, read or mmap, close) on tokio's blocking
//! pool so unrelated work keeps running; none of them touch shared state.

pub mod byte_source;
pub mod line_source;
pub mod mtime;
pub mod open;
pub mod policy;
pub mod reader;

pub use byte_source::{ByteSource, MMAP_THRESHOLD};
pub use line_source::{
    open_line_source, Cursor, EmptyLines, LineReader, LineSource, LineSourceOptions, Lines,
    Opened, EMPTY_LINES,
};
pub use mtime::{Mtime, MtimeFormat, MtimeValue};
pub use open::{open_and_stat, OpenFile};
pub use policy::{MissingPolicy, Outcome};
pub use reader::{read_whole_file, read_whole_file_with};

use crate::error::{FsError, Result};
use std::path::PathBuf;

/// [`read_whole_file`] on the blocking pool
pub async fn read_whole_file_async(
    path: impl Into<PathBuf>,
    ignore_missing: bool,
) -> Result<Option<Vec<u8>>> {
    let path = path.into();
    tokio::task::spawn_blocking(move || read_whole_file(&path, ignore_missing))
        .await
        .map_err(|e| FsError::task(e.to_string()))?
}

/// [`open_line_source`] on the blocking pool
///
/// Only opening runs off-thread. Iterating a mapped source may still fault
/// pages in on the calling thread.
pub async fn open_line_source_async(
    path: impl Into<PathBuf>,
    options: LineSourceOptions,
) -> Result<Opened> {
    let path = path.into();
    tokio::task::spawn_blocking(move || open_line_source(&path, &options))
        .await
        .map_err(|e| FsError::task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[tokio::test]
    async fn test_read_whole_file_async() {
        let test_file = create_test_file(b"async content");
        let data = read_whole_file_async(test_file.path(), false).await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"async content"[..]));
    }

    #[tokio::test]
    async fn test_read_whole_file_async_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        assert_eq!(read_whole_file_async(&missing, true).await.unwrap(), None);
        assert!(read_whole_file_async(&missing, false)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_open_line_source_async() {
        let test_file = create_test_file(&b"row\n".repeat(5000));
        let opened = open_line_source_async(test_file.path(), LineSourceOptions::new())
            .await
            .unwrap();

        let mut source = opened.into_source().expect("file exists");
        assert!(source.is_mapped());
        assert_eq!(source.lines().count(), 5000);
    }

    #[tokio::test]
    async fn test_concurrent_independent_sources() {
        let test_file = create_test_file(b"a\nb\nc\n");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = test_file.path().to_path_buf();
                tokio::spawn(async move {
                    let opened = open_line_source_async(path, LineSourceOptions::new())
                        .await
                        .unwrap();
                    let mut source = opened.into_source().unwrap();
                    source.lines().count()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 3);
        }
    }
}
