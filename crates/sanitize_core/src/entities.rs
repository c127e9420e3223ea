//! HTML character reference decoding
//!
//! Follows the HTML5 rules for text content: numeric references are remapped
//! like a browser would, and the legacy named references may appear without
//! a trailing semicolon, also as a prefix (`&notit;` is `¬it;`). The named
//! entity table itself comes from `html_escape`.

use std::borrow::Cow;

/// Named references a browser accepts without the trailing semicolon
const LEGACY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig",
    "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy",
    "curren", "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14",
    "frac34", "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt",
    "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf",
    "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg",
    "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

const LONGEST_LEGACY_NAME: usize = 6;

/// windows-1252 characters for numeric references 0x80..=0x9F
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Decode every character reference in `s`
pub(crate) fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let consumed = if tail.as_bytes().get(1) == Some(&b'#') {
            decode_numeric(tail, &mut out)
        } else {
            decode_named(tail, &mut out)
        };
        rest = &tail[consumed..];
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// `tail` starts with `&#`; returns the number of bytes consumed
fn decode_numeric(tail: &str, out: &mut String) -> usize {
    let (radix, start) = match tail.as_bytes().get(2) {
        Some(b'x' | b'X') => (16, 3),
        _ => (10, 2),
    };

    let digits = tail[start..]
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits == 0 {
        out.push('&');
        return 1;
    }

    // Anything past 0x10FFFF is invalid anyway, so saturate there
    let value = tail[start..start + digits]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u32, |acc, d| (acc * radix + d).min(0x11_0000));

    let mut end = start + digits;
    if tail.as_bytes().get(end) == Some(&b';') {
        end += 1;
    }

    out.push(numeric_char(value));
    end
}

fn numeric_char(value: u32) -> char {
    match value {
        0 => char::REPLACEMENT_CHARACTER,
        0x80..=0x9F => WINDOWS_1252[(value - 0x80) as usize],
        // Surrogates and out-of-range values
        _ => char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

/// `tail` starts with `&` not followed by `#`; returns the number of bytes consumed
fn decode_named(tail: &str, out: &mut String) -> usize {
    let name_len = tail[1..]
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        out.push('&');
        return 1;
    }

    let name = &tail[1..1 + name_len];
    let terminated = tail.as_bytes().get(1 + name_len) == Some(&b';');

    if terminated || LEGACY_NAMES.contains(&name) {
        if let Some(decoded) = lookup(name) {
            out.push_str(&decoded);
            return 1 + name_len + usize::from(terminated);
        }
    }

    // Longest legacy name that prefixes the run
    for len in (2..=name_len.min(LONGEST_LEGACY_NAME)).rev() {
        let prefix = &name[..len];
        if LEGACY_NAMES.contains(&prefix) {
            if let Some(decoded) = lookup(prefix) {
                out.push_str(&decoded);
                return 1 + len;
            }
        }
    }

    out.push_str(&tail[..1 + name_len]);
    1 + name_len
}

fn lookup(name: &str) -> Option<String> {
    let reference = format!("&{name};");
    let decoded = html_escape::decode_html_entities(&reference);
    if decoded == reference.as_str() {
        None
    } else {
        Some(decoded.into_owned())
    }
}
