//! Runtime preferences and user configuration.
//!
//! [`Preferences`] is the process-wide formatting context: create one at
//! start-up, hand clones to every line source, and any change made through a
//! clone is seen by later timestamp reads on all of them. [`Config`] holds
//! the defaults a front end uses to build options, optionally loaded from a
//! TOML file when the `config` feature is enabled.

use crate::file_handler::byte_source::MMAP_THRESHOLD;
use crate::file_handler::line_source::LineSourceOptions;
use crate::file_handler::mtime::{Mtime, MtimeFormat, MtimeValue};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, mutable timestamp-format preference
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    mtime_format: Arc<RwLock<MtimeFormat>>,
}

impl Preferences {
    pub fn new(mtime_format: MtimeFormat) -> Self {
        Self {
            mtime_format: Arc::new(RwLock::new(mtime_format)),
        }
    }

    pub fn mtime_format(&self) -> MtimeFormat {
        *self.mtime_format.read()
    }

    /// Change the format for every holder of this handle
    pub fn set_mtime_format(&self, format: MtimeFormat) {
        *self.mtime_format.write() = format;
    }

    /// Render `mtime` with the format in effect right now
    pub fn render(&self, mtime: Mtime) -> MtimeValue {
        mtime.render(self.mtime_format())
    }
}

/// User-facing defaults
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct Config {
    pub mtime_format: MtimeFormat,
    pub strip_newlines: bool,
    pub mmap_threshold: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mtime_format: MtimeFormat::default(),
            strip_newlines: true,
            mmap_threshold: MMAP_THRESHOLD,
        }
    }
}

impl Config {
    /// Preferences seeded from this configuration
    pub fn preferences(&self) -> Preferences {
        Preferences::new(self.mtime_format)
    }

    /// Line-source options seeded from this configuration
    pub fn line_source_options(&self, preferences: &Preferences) -> LineSourceOptions {
        LineSourceOptions::new()
            .strip_newlines(self.strip_newlines)
            .mmap_threshold(self.mmap_threshold)
            .preferences(preferences.clone())
    }
}

#[cfg(feature = "config")]
mod file {
    use super::Config;
    use crate::error::{FsError, Result};
    use std::path::{Path, PathBuf};

    impl Config {
        pub fn from_toml_str(text: &str) -> Result<Self> {
            toml::from_str(text).map_err(|e| FsError::config(e.to_string()))
        }

        /// Load configuration from `path`
        pub fn load(path: &Path) -> Result<Self> {
            let text = std::fs::read_to_string(path).map_err(|e| {
                FsError::config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Self::from_toml_str(&text)
        }

        /// `<config_dir>/fastfs/config.toml`, if the platform has a config dir
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("fastfs").join("config.toml"))
        }

        /// Load the default configuration file; a missing file means defaults
        pub fn load_default() -> Result<Self> {
            match Self::default_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_shared_between_clones() {
        let preferences = Preferences::default();
        let clone = preferences.clone();
        assert_eq!(clone.mtime_format(), MtimeFormat::Fractional);

        preferences.set_mtime_format(MtimeFormat::Integer);
        assert_eq!(clone.mtime_format(), MtimeFormat::Integer);
        assert_eq!(clone.render(Mtime::new(5, 10)), MtimeValue::Seconds(5));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.strip_newlines);
        assert_eq!(config.mmap_threshold, 16384);
        assert_eq!(config.preferences().mtime_format(), MtimeFormat::Fractional);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_from_toml() {
        let config = Config::from_toml_str("mtime_format = \"integer\"\nstrip_newlines = false\n")
            .unwrap();
        assert_eq!(config.mtime_format, MtimeFormat::Integer);
        assert!(!config.strip_newlines);
        assert_eq!(config.mmap_threshold, MMAP_THRESHOLD);

        let err = Config::from_toml_str("bogus = 1").unwrap_err();
        assert!(matches!(err, crate::FsError::Config { .. }));
    }
}
