//! Lexical path normalization.
//!
//! A single left-to-right scan over the input writes into an output buffer,
//! tracking how many concrete segments have been written (`depth`) so that a
//! `..` knows whether it can collapse the previous segment.

use bstr::BString;
use memchr::{memchr, memrchr};

/// Normalize a `/`-separated path without consulting the filesystem.
///
/// - runs of `/` collapse to one separator
/// - `.` segments are dropped
/// - `..` removes the previously written segment; with nothing to remove it
///   is kept literally in a relative path and dropped at the root of an
///   absolute one
/// - a trailing `/` is stripped unless the result is the root itself
///
/// An empty input, or one that collapses to nothing, yields `"."`.
///
/// # Examples
///
/// ```
/// use fastfs::path::normalize;
///
/// assert_eq!(normalize("a/./b/../c"), "a/c");
/// assert_eq!(normalize("/a/../../b"), "/b");
/// assert_eq!(normalize(".."), "..");
/// assert_eq!(normalize(""), ".");
/// ```
pub fn normalize(path: impl AsRef<[u8]>) -> BString {
    let path = path.as_ref();
    if path.is_empty() {
        return BString::from(".");
    }

    let absolute = path[0] == b'/';
    let mut out: Vec<u8> = Vec::with_capacity(path.len() + 1);
    // Segments written and terminated by '/', not counting the root.
    let mut depth: usize = 0;
    let mut pos = 0;

    while pos < path.len() {
        if path[pos] == b'/' {
            out.push(b'/');
            if pos != 0 {
                depth += 1;
            }
            pos = skip_slashes(path, pos);
            continue;
        }

        let end = memchr(b'/', &path[pos..]).map_or(path.len(), |off| pos + off);
        match &path[pos..end] {
            b"." => pos = skip_slashes(path, end),
            b".." => {
                if depth > 0 {
                    debug_assert_eq!(out.last(), Some(&b'/'));
                    let body = &out[..out.len() - 1];
                    let cut = memrchr(b'/', body).map_or(0, |idx| idx + 1);
                    out.truncate(cut);
                    depth -= 1;
                } else if !absolute {
                    out.extend_from_slice(b"../");
                }
                pos = skip_slashes(path, end);
            }
            segment => {
                out.extend_from_slice(segment);
                pos = end;
            }
        }
    }

    if out.len() > 1 && out.last() == Some(&b'/') {
        out.pop();
    }
    if out.is_empty() {
        out.push(b'.');
    }
    BString::from(out)
}

fn skip_slashes(path: &[u8], mut pos: usize) -> usize {
    while pos < path.len() && path[pos] == b'/' {
        pos += 1;
    }
    pos
}
