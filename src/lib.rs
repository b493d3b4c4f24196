//! # fastfs - Fast Low-Level Filesystem Primitives
//!
//! Byte-oriented helpers for code that handles a lot of paths and small
//! text files: lexical path normalization and joining, whole-file reads, and
//! a lazy line iterator that memory-maps large files and buffers small ones.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error type and handling
//! - [`path`] - `/`-separated byte-string normalization and joining
//! - [`file_handler`] - Open-and-stat, whole-file reads, line sources
//! - [`config`] - Timestamp-format preferences and user configuration
//!
//! ## Example
//!
//! ```no_run
//! use fastfs::{open_line_source, LineSourceOptions, MissingPolicy, Opened};
//!
//! let options = LineSourceOptions::new().missing(MissingPolicy::Empty);
//! if let Opened::Source(mut source) = open_line_source("/etc/hosts", &options)? {
//!     for line in source.lines() {
//!         println!("{}", String::from_utf8_lossy(line));
//!     }
//! }
//! # Ok::<(), fastfs::FsError>(())
//! ```

// Core modules
pub mod error;
pub mod path;

// File access
pub mod config;
pub mod file_handler;

// Re-export commonly used types for convenience
pub use error::{FsError, Result};

// Public API surface for external usage
pub use config::{Config, Preferences};
pub use file_handler::{
    open_line_source, open_line_source_async, read_whole_file, read_whole_file_async, EmptyLines,
    LineReader, LineSource, LineSourceOptions, MissingPolicy, MtimeFormat, MtimeValue, Opened,
};
pub use path::{join, normalize};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
