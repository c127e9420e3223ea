//! Content-derived fallback names

use md5::{Digest, Md5};

/// Length of a fallback name (hex-encoded 128-bit digest)
pub const FALLBACK_LEN: usize = 32;

/// Lowercase hex MD5 digest of `original`
///
/// Hex digits can't violate any naming rule, so this is always a valid name.
pub fn fallback_name(original: &[u8]) -> String {
    hex::encode(Md5::digest(original))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(fallback_name(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(fallback_name(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_shape() {
        let name = fallback_name("con".as_bytes());
        assert_eq!(name.len(), FALLBACK_LEN);
        assert!(name.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}
