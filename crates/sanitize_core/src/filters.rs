//! Individual pipeline stages shared by `name` and `clean`

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::entities;
use crate::submatch::replace_all_submatch;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// Runs of Cc characters
static CONTROL_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\p{Cc}+"));

/// Characters forbidden on Windows: < > : " / \ | ? *
static RESERVED_RUN: Lazy<Regex> = Lazy::new(|| compile(r#"[<>:"/\\|?*]+"#));

static TRAILING_SPACE_DOT: Lazy<Regex> = Lazy::new(|| compile(r"(?:[[:space:]]|\.)+$"));

static LEADING_DOTS: Lazy<Regex> = Lazy::new(|| compile(r"^\.+"));

/// Control (Cc) and format (Cf) characters, e.g. zero-width joiners
static INVISIBLE: Lazy<Regex> = Lazy::new(|| compile(r"\p{Cc}|\p{Cf}"));

/// Line (Zl), paragraph (Zp) and space (Zs) separators
static SEPARATOR: Lazy<Regex> = Lazy::new(|| compile(r"\p{Zl}|\p{Zp}|\p{Zs}"));

/// Separator classes collapsed by `clean`, with the literal each run becomes
const REPEATED_CLASSES: [(&str, &str); 6] = [
    (r"[[:space:]]", ""),
    ("_", "_"),
    ("-", "-"),
    (r"\+", "+"),
    (r"\.", "."),
    ("!", "!"),
];

static REPEATED_SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = REPEATED_CLASSES
        .iter()
        .map(|(class, _)| format!("({class}{{2,}})"))
        .collect();
    compile(&alternatives.join("|"))
});

pub(crate) fn unescape_entities(s: &str) -> Cow<'_, str> {
    entities::unescape(s)
}

pub(crate) fn replace_control_runs<'a>(s: &'a str, replacement: &str) -> Cow<'a, str> {
    CONTROL_RUN.replace_all(s, NoExpand(replacement))
}

pub(crate) fn replace_reserved_runs<'a>(s: &'a str, replacement: &str) -> Cow<'a, str> {
    RESERVED_RUN.replace_all(s, NoExpand(replacement))
}

pub(crate) fn replace_trailing_space_dot<'a>(s: &'a str, replacement: &str) -> Cow<'a, str> {
    TRAILING_SPACE_DOT.replace(s, NoExpand(replacement))
}

pub(crate) fn collapse_leading_dots(s: &str) -> Cow<'_, str> {
    LEADING_DOTS.replace(s, ".")
}

pub(crate) fn replace_invisible<'a>(s: &'a str, replacement: &str) -> Cow<'a, str> {
    INVISIBLE.replace_all(s, NoExpand(replacement))
}

pub(crate) fn normalize_separators(s: &str) -> Cow<'_, str> {
    SEPARATOR.replace_all(s, " ")
}

pub(crate) fn collapse_repeated_separators(s: &str) -> Cow<'_, str> {
    let literals = REPEATED_CLASSES.map(|(_, literal)| literal);
    match replace_all_submatch(&REPEATED_SEPARATORS, s, &literals) {
        Ok(collapsed) => collapsed,
        Err(e) => {
            tracing::error!("Skipping separator collapse: {}", e);
            Cow::Borrowed(s)
        }
    }
}

/// Pattern matching two or more consecutive copies of `replacement`
pub(crate) fn repeated_pattern(replacement: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?:{}){{2,}}", regex::escape(replacement)))
}
