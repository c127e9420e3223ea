//! Cross-platform filename sanitization
//!
//! Turns an arbitrary name into one that is valid on common filesystems:
//! - No control characters or reserved characters (`< > : " / \ | ? *`)
//! - No reserved device names (`con`, `nul`, `com1`, ...)
//! - No trailing dots/spaces, bounded length in bytes
//!
//! When no valid name can be derived, an MD5 digest of the original bytes is
//! returned instead, so every input yields some usable name.

mod encoding;
mod entities;
mod fallback;
mod filters;
mod sanitizer;
mod submatch;
mod validity;

pub use encoding::repair_utf8;
pub use fallback::{fallback_name, FALLBACK_LEN};
pub use sanitizer::{Mode, Sanitizer, DEFAULT_MAX_LENGTH, MAX_LENGTH_LIMIT};
pub use submatch::replace_all_submatch;
pub use validity::is_valid_name;

use thiserror::Error;

/// Sanitizer errors
#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("replacement can't contain control characters")]
    ControlCharacter,

    #[error("replacement can't contain ., <, >, :, \", /, \\, |, ?, *")]
    InvalidCharacter,

    #[error("max length {max_length} can't be greater than {limit}")]
    LengthExceeded { max_length: usize, limit: usize },

    #[error("pattern has {groups} submatch groups but {replacements} replacements were given")]
    GroupMismatch { groups: usize, replacements: usize },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, SanitizeError>;
