//! Open-time modification timestamps and their rendering.

use std::fs::Metadata;

/// How an [`Mtime`] is rendered when read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum MtimeFormat {
    /// Whole seconds since the epoch
    Integer,
    /// Seconds plus the sub-second remainder as a float
    #[default]
    Fractional,
}

/// A rendered timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MtimeValue {
    Seconds(i64),
    Fractional(f64),
}

impl MtimeValue {
    /// The value as a float regardless of rendering
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Seconds(secs) => secs as f64,
            Self::Fractional(value) => value,
        }
    }
}

impl std::fmt::Display for MtimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds(secs) => write!(f, "{}", secs),
            Self::Fractional(value) => write!(f, "{:.9}", value),
        }
    }
}

/// Modification time captured from a descriptor's stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mtime {
    secs: i64,
    nanos: u32,
}

impl Mtime {
    pub fn new(secs: i64, nanos: u32) -> Self {
        debug_assert!(nanos < 1_000_000_000);
        Self { secs, nanos }
    }

    #[cfg(unix)]
    pub(crate) fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self::new(metadata.mtime(), metadata.mtime_nsec() as u32)
    }

    #[cfg(not(unix))]
    pub(crate) fn from_metadata(metadata: &Metadata) -> Self {
        use std::time::UNIX_EPOCH;
        // Pre-epoch and unsupported timestamps clamp to the epoch.
        metadata
            .modified()
            .ok()
            .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
            .map_or(Self::new(0, 0), |since| {
                Self::new(since.as_secs() as i64, since.subsec_nanos())
            })
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    pub fn render(&self, format: MtimeFormat) -> MtimeValue {
        match format {
            MtimeFormat::Integer => MtimeValue::Seconds(self.secs),
            MtimeFormat::Fractional => {
                MtimeValue::Fractional(self.secs as f64 + 1e-9 * self.nanos as f64)
            }
        }
    }
}
