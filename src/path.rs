//! Pure byte-string path algorithms.
//!
//! Both functions operate on `/`-separated byte strings only. Nothing here
//! touches the filesystem: no symlinks are followed and no existence checks
//! are made.

pub mod join;
pub mod normalize;

pub use join::join;
pub use normalize::normalize;
