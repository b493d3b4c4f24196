//! Multi-segment path joining.

use crate::error::{FsError, Result};
use bstr::BString;

/// Join path segments with `/`.
///
/// The rightmost segment starting with `/` (the anchor) resets the join:
/// everything before it is discarded. From the anchor onward, segments are
/// concatenated with a single `/` between them. Trailing slash runs on every
/// segment but the last collapse into that one separator; the final
/// segment's trailing slashes are kept verbatim. Slash runs inside a segment
/// are copied unchanged. Empty segments contribute nothing, not even a
/// separator.
///
/// # Errors
/// Returns [`FsError::Usage`] if `segments` is empty.
///
/// # Examples
///
/// ```
/// use fastfs::path::join;
///
/// assert_eq!(join(&["a", "b/", "c"]).unwrap(), "a/b/c");
/// assert_eq!(join(&["/a/", "b", "/c"]).unwrap(), "/c");
/// assert_eq!(join(&["a", "", " ", "c"]).unwrap(), "a/ /c");
/// ```
pub fn join<S: AsRef<[u8]>>(segments: &[S]) -> Result<BString> {
    if segments.is_empty() {
        return Err(FsError::usage(
            "join takes at least one segment (0 given)",
        ));
    }

    let anchor = segments
        .iter()
        .rposition(|segment| segment.as_ref().first() == Some(&b'/'));
    let start = anchor.unwrap_or(0);
    let tail = &segments[start..];
    let last = tail.len() - 1;

    let capacity = tail.iter().map(|s| s.as_ref().len() + 1).sum();
    let mut out: Vec<u8> = Vec::with_capacity(capacity);
    if anchor.is_some() {
        out.push(b'/');
    }

    for (idx, segment) in tail.iter().enumerate() {
        let mut bytes = segment.as_ref();
        if idx == 0 && anchor.is_some() {
            // The leading separator is already written.
            bytes = &bytes[1..];
        }
        if bytes.is_empty() {
            continue;
        }

        if idx == last {
            out.extend_from_slice(bytes);
        } else {
            let body_len = bytes
                .iter()
                .rposition(|&b| b != b'/')
                .map_or(0, |pos| pos + 1);
            out.extend_from_slice(&bytes[..body_len]);
            out.push(b'/');
        }
    }

    Ok(BString::from(out))
}
