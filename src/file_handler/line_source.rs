//! Lazy, forward-only line iteration over a file.
//!
//! A [`LineSource`] owns its backing store ([`ByteSource`]): a memory mapping
//! for files at or above the mapping threshold, an owned buffer below it.
//! Records are borrowed straight out of that store, so they cannot outlive
//! the source, and the source cannot be released while a record is held.
//!
//! The captured modification time is read-only:
//!
//! ```compile_fail
//! # fn check(source: &mut fastfs::LineSource) {
//! source.mtime = fastfs::file_handler::Mtime::new(0, 0);
//! # }
//! ```

use crate::config::Preferences;
use crate::error::Result;
use crate::file_handler::byte_source::{ByteSource, MMAP_THRESHOLD};
use crate::file_handler::mtime::{Mtime, MtimeValue};
use crate::file_handler::open::{open_and_stat, OpenFile};
use crate::file_handler::policy::{MissingPolicy, Outcome};
use memchr::memchr;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

/// Options for [`open_line_source`]
#[derive(Debug, Clone)]
pub struct LineSourceOptions {
    strip_newlines: bool,
    missing: MissingPolicy,
    preferences: Preferences,
    mmap_threshold: u64,
}

impl Default for LineSourceOptions {
    fn default() -> Self {
        Self {
            strip_newlines: true,
            missing: MissingPolicy::Raise,
            preferences: Preferences::default(),
            mmap_threshold: MMAP_THRESHOLD,
        }
    }
}

impl LineSourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the trailing `\n` from each record (default: true)
    pub fn strip_newlines(mut self, strip: bool) -> Self {
        self.strip_newlines = strip;
        self
    }

    pub fn missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Formatting context consulted by [`LineSource::mtime`]
    pub fn preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Size at which the file is mapped instead of buffered
    pub fn mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }
}

/// Byte region `[start, end)` with a forward-only read position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    start: usize,
    end: usize,
    position: usize,
}

impl Cursor {
    fn new(end: usize) -> Self {
        Self {
            start: 0,
            end,
            position: 0,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.end - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.end
    }

    fn advance_to(&mut self, position: usize) {
        debug_assert!(self.position <= position && position <= self.end);
        self.position = position;
    }
}

/// Cut the next record out of `bytes` and advance the cursor past it
fn next_record<'a>(bytes: &'a [u8], cursor: &mut Cursor, strip_newlines: bool) -> Option<&'a [u8]> {
    if cursor.is_exhausted() {
        return None;
    }

    let start = cursor.position;
    match memchr(b'\n', &bytes[start..cursor.end]) {
        Some(offset) => {
            let newline = start + offset;
            cursor.advance_to(newline + 1);
            let end = if strip_newlines { newline } else { newline + 1 };
            Some(&bytes[start..end])
        }
        None => {
            // Final record without a delimiter; nothing to strip.
            let end = cursor.end;
            cursor.advance_to(end);
            Some(&bytes[start..end])
        }
    }
}

/// Common surface of a real line source and the empty sequence
pub trait LineReader {
    /// Next record, or `None` once exhausted (and on every call after)
    fn next_line(&mut self) -> Option<&[u8]>;

    /// Captured modification time; `None` when there is no file behind the reader
    fn mtime(&self) -> Option<MtimeValue>;
}

/// Lines of an open file
#[derive(Debug)]
pub struct LineSource {
    /// Always `Some` until teardown
    source: Option<ByteSource>,
    cursor: Cursor,
    strip_newlines: bool,
    mtime: Mtime,
    preferences: Preferences,
    path: PathBuf,
}

impl LineSource {
    fn from_open_file(opened: OpenFile, options: &LineSourceOptions) -> Result<Self> {
        let mtime = opened.mtime();
        let path = opened.path().to_path_buf();
        let source = ByteSource::load(opened, options.mmap_threshold)?;
        let cursor = Cursor::new(source.as_bytes().len());

        Ok(Self {
            source: Some(source),
            cursor,
            strip_newlines: options.strip_newlines,
            mtime,
            preferences: options.preferences.clone(),
            path,
        })
    }

    /// Next record, borrowed from the backing store
    pub fn next_line(&mut self) -> Option<&[u8]> {
        let source = self.source.as_ref()?;
        next_record(source.as_bytes(), &mut self.cursor, self.strip_newlines)
    }

    /// Iterate the remaining records
    pub fn lines(&mut self) -> Lines<'_> {
        Lines {
            bytes: self.source.as_ref().map_or(&[][..], ByteSource::as_bytes),
            cursor: &mut self.cursor,
            strip_newlines: self.strip_newlines,
        }
    }

    /// Modification time captured at open, rendered with the current preference
    pub fn mtime(&self) -> MtimeValue {
        self.preferences.render(self.mtime)
    }

    /// Modification time captured at open
    pub fn raw_mtime(&self) -> Mtime {
        self.mtime
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &[u8] {
        self.source.as_ref().map_or(&[][..], |source| {
            &source.as_bytes()[self.cursor.position..self.cursor.end]
        })
    }

    /// File size captured at open
    pub fn len(&self) -> usize {
        self.cursor.end - self.cursor.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the backing store is a memory mapping
    pub fn is_mapped(&self) -> bool {
        self.source.as_ref().is_some_and(ByteSource::is_mapped)
    }

    pub fn strips_newlines(&self) -> bool {
        self.strip_newlines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the backing store now instead of at end of scope
    pub fn release(mut self) {
        self.release_source();
    }

    fn release_source(&mut self) {
        if let Some(source) = self.source.take() {
            source.release();
            let end = self.cursor.end;
            self.cursor.advance_to(end);
        }
    }
}

impl Drop for LineSource {
    fn drop(&mut self) {
        self.release_source();
    }
}

impl LineReader for LineSource {
    fn next_line(&mut self) -> Option<&[u8]> {
        LineSource::next_line(self)
    }

    fn mtime(&self) -> Option<MtimeValue> {
        Some(LineSource::mtime(self))
    }
}

/// Borrowing iterator over a [`LineSource`]'s records
#[derive(Debug)]
pub struct Lines<'a> {
    bytes: &'a [u8],
    cursor: &'a mut Cursor,
    strip_newlines: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let bytes: &'a [u8] = self.bytes;
        next_record(bytes, self.cursor, self.strip_newlines)
    }
}

impl FusedIterator for Lines<'_> {}

/// The sequence returned for a missing file under [`MissingPolicy::Empty`].
///
/// Stateless; every instance is interchangeable with [`EMPTY_LINES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyLines;

/// Shared empty sequence
pub const EMPTY_LINES: EmptyLines = EmptyLines;

impl Iterator for EmptyLines {
    type Item = &'static [u8];

    fn next(&mut self) -> Option<Self::Item> {
        None
    }
}

impl FusedIterator for EmptyLines {}

impl LineReader for EmptyLines {
    fn next_line(&mut self) -> Option<&[u8]> {
        None
    }

    fn mtime(&self) -> Option<MtimeValue> {
        None
    }
}

/// Result of [`open_line_source`]
#[derive(Debug)]
pub enum Opened {
    Source(LineSource),
    Empty(EmptyLines),
    Absent,
}

impl Opened {
    pub fn is_absent(&self) -> bool {
        matches!(self, Opened::Absent)
    }

    pub fn into_source(self) -> Option<LineSource> {
        match self {
            Opened::Source(source) => Some(source),
            _ => None,
        }
    }

    /// Uniform reader over a source or the empty sequence; `None` when absent
    pub fn as_reader(&mut self) -> Option<&mut dyn LineReader> {
        match self {
            Opened::Source(source) => Some(source),
            Opened::Empty(empty) => Some(empty),
            Opened::Absent => None,
        }
    }
}

/// Open `path` for line iteration.
///
/// Files of at least `mmap_threshold` bytes (16384 by default) are mapped
/// read-only with pages prefetched, and the descriptor is held until
/// release. Smaller files are read into memory and the descriptor is closed
/// before this returns. A missing file is handled by the options' policy;
/// every other failure is an error.
pub fn open_line_source(path: impl AsRef<Path>, options: &LineSourceOptions) -> Result<Opened> {
    let path = path.as_ref();
    match options.missing.resolve(open_and_stat(path))? {
        Outcome::Found(opened) => LineSource::from_open_file(opened, options).map(Opened::Source),
        Outcome::Empty => Ok(Opened::Empty(EMPTY_LINES)),
        Outcome::Absent => Ok(Opened::Absent),
    }
}
