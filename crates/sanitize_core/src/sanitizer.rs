//! Sanitizer configuration and the `name` / `clean` pipelines

use std::fmt;
use std::str::FromStr;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::encoding::repair_utf8;
use crate::filters;
use crate::validity::finalize;
use crate::{Result, SanitizeError};

/// Default maximum output length in bytes
pub const DEFAULT_MAX_LENGTH: usize = 240;

/// Hard ceiling for the maximum output length
pub const MAX_LENGTH_LIMIT: usize = 255;

/// Which pipeline to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Fix only what the filesystem rejects
    #[serde(rename = "name")]
    Name,
    /// Also drop invisible characters and collapse repeated separators
    #[serde(rename = "clean")]
    #[default]
    Clean,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Name => write!(f, "name"),
            Mode::Clean => write!(f, "clean"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Mode::Name),
            "clean" => Ok(Mode::Clean),
            other => Err(format!("unknown mode '{}', expected 'name' or 'clean'", other)),
        }
    }
}

/// Filename sanitizer
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    replacement: String,
    max_length: usize,
    /// Two or more consecutive copies of `replacement`, if it is non-empty
    repeated_replacement: Option<Regex>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            replacement: String::new(),
            max_length: DEFAULT_MAX_LENGTH,
            repeated_replacement: None,
        }
    }
}

impl Sanitizer {
    /// Sanitizer that deletes disallowed characters and caps names at 240 bytes
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizer with a custom replacement string and length cap
    ///
    /// The replacement must not contain control characters, dots, or any of
    /// `< > : " / \ | ? *`, and `max_length` must not exceed 255.
    ///
    /// `max_length` only caps filtered names. A digest fallback is always
    /// [`FALLBACK_LEN`](crate::FALLBACK_LEN) bytes, so with a cap below 32
    /// fallback names exceed it. Truncation also happens after the validity
    /// check: a cap of 3 turns `con.txt` into `con`, and a cap of 0 yields an
    /// empty name.
    pub fn with_options(replacement: &str, max_length: usize) -> Result<Self> {
        if replacement.chars().any(char::is_control) {
            return Err(SanitizeError::ControlCharacter);
        }

        if replacement
            .chars()
            .any(|c| matches!(c, '.' | '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        {
            return Err(SanitizeError::InvalidCharacter);
        }

        if max_length > MAX_LENGTH_LIMIT {
            return Err(SanitizeError::LengthExceeded {
                max_length,
                limit: MAX_LENGTH_LIMIT,
            });
        }

        let repeated_replacement = if replacement.is_empty() {
            None
        } else {
            Some(filters::repeated_pattern(replacement)?)
        };

        Ok(Self {
            replacement: replacement.to_string(),
            max_length,
            repeated_replacement,
        })
    }

    /// Like `with_options`, but always returns a usable sanitizer
    ///
    /// On invalid options the default sanitizer is returned with the error.
    pub fn with_options_or_default(
        replacement: &str,
        max_length: usize,
    ) -> (Self, Option<SanitizeError>) {
        match Self::with_options(replacement, max_length) {
            Ok(sanitizer) => (sanitizer, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Light sanitization: keeps as much of `file_name` as possible
    pub fn name(&self, file_name: &str) -> String {
        self.name_bytes(file_name.as_bytes())
    }

    /// `name` for raw bytes that may not be valid UTF-8
    pub fn name_bytes(&self, file_name: &[u8]) -> String {
        let r = self.replacement.as_str();

        let s = repair_utf8(file_name, r);
        let s = filters::unescape_entities(&s).into_owned();
        let s = filters::replace_control_runs(&s, r).into_owned();
        let s = filters::replace_reserved_runs(&s, r).into_owned();
        let s = filters::replace_trailing_space_dot(&s, r).into_owned();
        let s = filters::collapse_leading_dots(&s).into_owned();

        finalize(file_name, s, r, self.max_length)
    }

    /// Aggressive sanitization: also removes invisible characters and
    /// collapses repeated separators
    pub fn clean(&self, file_name: &str) -> String {
        self.clean_bytes(file_name.as_bytes())
    }

    /// `clean` for raw bytes that may not be valid UTF-8
    pub fn clean_bytes(&self, file_name: &[u8]) -> String {
        let r = self.replacement.as_str();

        let s = repair_utf8(file_name, r);
        let s = filters::unescape_entities(&s).into_owned();

        let s = filters::replace_invisible(&s, r).into_owned();
        let s = filters::normalize_separators(&s).into_owned();
        let s = filters::replace_reserved_runs(&s, r).into_owned();

        let s = filters::collapse_repeated_separators(&s).into_owned();
        let s = self.collapse_replacement(s);
        let s = filters::replace_trailing_space_dot(&s, r).into_owned();
        // Trimming may leave the replacement next to an existing one
        let s = self.collapse_replacement(s);
        let s = filters::collapse_leading_dots(&s).into_owned();

        finalize(file_name, s, r, self.max_length)
    }

    /// Run the pipeline selected by `mode`
    pub fn apply(&self, mode: Mode, file_name: &str) -> String {
        self.apply_bytes(mode, file_name.as_bytes())
    }

    pub fn apply_bytes(&self, mode: Mode, file_name: &[u8]) -> String {
        match mode {
            Mode::Name => self.name_bytes(file_name),
            Mode::Clean => self.clean_bytes(file_name),
        }
    }

    fn collapse_replacement(&self, s: String) -> String {
        match &self.repeated_replacement {
            Some(re) => re.replace_all(&s, NoExpand(&self.replacement)).into_owned(),
            None => s,
        }
    }
}
