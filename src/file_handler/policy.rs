//! Missing-file policy resolution.
//!
//! Only [`FsError::NotFound`] is subject to a policy. Every other error
//! propagates unchanged whatever the policy says.

use crate::error::{FsError, Result};

/// What to do when the path does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Surface [`FsError::NotFound`]
    #[default]
    Raise,
    /// Produce an empty result (an exhausted line sequence, an empty buffer)
    Empty,
    /// Produce the absent sentinel
    Absent,
}

/// Result of applying a [`MissingPolicy`] to an open attempt
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    Empty,
    Absent,
}

impl MissingPolicy {
    /// Map the boolean flag surface onto a single policy.
    ///
    /// Precedence when several flags are set: `empty_on_missing` wins over
    /// `absent_on_missing`, which wins over `ignore_missing`. `ignore_missing`
    /// on its own selects [`MissingPolicy::Empty`]. With no flag set the
    /// policy is [`MissingPolicy::Raise`].
    pub fn from_flags(ignore_missing: bool, empty_on_missing: bool, absent_on_missing: bool) -> Self {
        if empty_on_missing {
            Self::Empty
        } else if absent_on_missing {
            Self::Absent
        } else if ignore_missing {
            Self::Empty
        } else {
            Self::Raise
        }
    }

    /// The two-way policy used by whole-file reads
    pub fn ignore_or_raise(ignore_missing: bool) -> Self {
        if ignore_missing {
            Self::Absent
        } else {
            Self::Raise
        }
    }

    /// Resolve an open attempt against this policy
    pub fn resolve<T>(self, attempt: Result<T>) -> Result<Outcome<T>> {
        match attempt {
            Ok(value) => Ok(Outcome::Found(value)),
            Err(err @ FsError::NotFound { .. }) => match self {
                Self::Raise => Err(err),
                Self::Empty => Ok(Outcome::Empty),
                Self::Absent => Ok(Outcome::Absent),
            },
            Err(err) => Err(err),
        }
    }
}
