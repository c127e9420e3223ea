//! Validity gate: decides between the filtered candidate and the fallback

use crate::fallback::fallback_name;

/// Windows device names plus `.` and `..`, indexed by length in bytes
const RESERVED_NAMES: [&[&str]; 5] = [
    &[],
    &["."],
    &[".."],
    &["con", "prn", "aux", "nul"],
    &[
        "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8", "com9",
        "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
    ],
];

/// Check the final-name rules: non-empty and not a reserved name
///
/// Only exact matches are rejected; `con.txt` is accepted.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    match RESERVED_NAMES.get(name.len()) {
        Some(reserved) => !reserved.iter().any(|r| name.eq_ignore_ascii_case(r)),
        None => true,
    }
}

/// Pick the final name for `original`
///
/// A candidate that is invalid, or that filtering reduced to exactly the
/// replacement string, is discarded in favour of the digest of `original`.
pub(crate) fn finalize(
    original: &[u8],
    mut candidate: String,
    replacement: &str,
    max_length: usize,
) -> String {
    if candidate != replacement && is_valid_name(&candidate) {
        if candidate.len() > max_length {
            let mut end = max_length;
            while !candidate.is_char_boundary(end) {
                end -= 1;
            }
            tracing::trace!(from = candidate.len(), to = end, "Truncating candidate");
            candidate.truncate(end);
        }
        return candidate;
    }

    let fallback = fallback_name(original);
    tracing::debug!(candidate = %candidate, fallback = %fallback, "Falling back to digest");
    fallback
}
