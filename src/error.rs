//! Error types and handling infrastructure for fastfs.
//!
//! This module provides a centralized error type built with `thiserror`. The
//! binary layers `anyhow` on top for context at the command-line boundary.
//!
//! ## Taxonomy
//!
//! - **Usage**: the caller asked for something malformed (empty join list,
//!   empty path, path with an embedded NUL)
//! - **NotFound**: the open call hit ENOENT; this is the only kind a
//!   [`MissingPolicy`](crate::file_handler::MissingPolicy) may suppress
//! - **Os**: any other syscall failure, always carrying the path and raw errno

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for fastfs operations.
#[derive(Error, Debug)]
pub enum FsError {
    /// Malformed arguments
    #[error("Invalid usage: {message}")]
    Usage { message: String },

    /// The path does not exist at open time
    #[error("No such file: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied, I/O failure, mapping failure, short read, close failure.
    ///
    /// `code` is the raw errno, or 0 when the condition has none (a short read).
    #[error("{message}: {} (os error {code})", path.display())]
    Os {
        path: PathBuf,
        code: i32,
        message: String,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A blocking task spawned by an async wrapper did not complete
    #[error("Background task failed: {message}")]
    Task { message: String },
}

/// Standard Result type for fastfs operations.
pub type Result<T> = std::result::Result<T, FsError>;

impl FsError {
    /// Create a Usage error with a descriptive message
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create an Os error for `path`, capturing the raw errno from `source`
    pub fn os(path: &Path, message: impl Into<String>, source: io::Error) -> Self {
        Self::Os {
            path: path.to_path_buf(),
            code: source.raw_os_error().unwrap_or(0),
            message: message.into(),
            source,
        }
    }

    /// Classify an io::Error raised while opening `path`
    ///
    /// ENOENT becomes [`FsError::NotFound`], a rejected path string (embedded
    /// NUL) becomes [`FsError::Usage`], everything else is [`FsError::Os`].
    pub fn from_io(path: &Path, message: impl Into<String>, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
                source,
            },
            io::ErrorKind::InvalidInput => Self::Usage {
                message: format!("{}: {}", path.display(), source),
            },
            _ => Self::os(path, message, source),
        }
    }

    /// Create a Config error with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a Task error with a descriptive message
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Whether this is the "no such file" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Raw OS error code, if this error came from a syscall
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Self::NotFound { source, .. } => source.raw_os_error(),
            Self::Os { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Path the failing operation was applied to
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. } | Self::Os { path, .. } => Some(path),
            _ => None,
        }
    }
}
