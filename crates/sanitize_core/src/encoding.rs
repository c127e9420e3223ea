//! UTF-8 repair for raw filename bytes
//!
//! Names coming from the filesystem are not guaranteed to be UTF-8. Every
//! ill-formed run is replaced so the rest of the pipeline works on `str`.

use std::borrow::Cow;

/// Replace each maximal run of ill-formed UTF-8 with `replacement`
///
/// Consecutive invalid sequences collapse into a single `replacement`.
/// Well-formed input is returned borrowed.
pub fn repair_utf8<'a>(bytes: &'a [u8], replacement: &str) -> Cow<'a, str> {
    // Fast path: already valid
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(bytes.len());
    let mut rest = bytes;
    let mut in_invalid_run = false;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                result.push_str(valid);
                break;
            }
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                if valid_up_to > 0 {
                    if let Ok(valid) = std::str::from_utf8(&rest[..valid_up_to]) {
                        result.push_str(valid);
                    }
                    in_invalid_run = false;
                }

                if !in_invalid_run {
                    result.push_str(replacement);
                    in_invalid_run = true;
                }

                // None means an incomplete sequence at the very end
                let skip = e.error_len().unwrap_or(rest.len() - valid_up_to);
                rest = &rest[valid_up_to + skip..];
            }
        }
    }

    Cow::Owned(result)
}
