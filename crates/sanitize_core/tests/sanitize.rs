//! End-to-end behaviour of `Sanitizer::name` and `Sanitizer::clean`

use sanitize_core::{fallback_name, Mode, SanitizeError, Sanitizer, FALLBACK_LEN};

fn dashed() -> Sanitizer {
    Sanitizer::with_options("-", 235).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn construction_rejects_bad_options() {
    assert!(matches!(
        Sanitizer::with_options("/", 240),
        Err(SanitizeError::InvalidCharacter)
    ));
    assert!(matches!(
        Sanitizer::with_options("a\nb", 240),
        Err(SanitizeError::ControlCharacter)
    ));
    assert!(matches!(
        Sanitizer::with_options("", 300),
        Err(SanitizeError::LengthExceeded { .. })
    ));
    assert!(Sanitizer::with_options("-", 235).is_ok());
    assert!(Sanitizer::with_options("", 255).is_ok());
}

#[test]
fn error_messages_are_readable() {
    let err = Sanitizer::with_options("", 300).unwrap_err();
    assert_eq!(err.to_string(), "max length 300 can't be greater than 255");
}

// ============================================================================
// Reserved names
// ============================================================================

#[test]
fn reserved_names_fall_back() {
    let s = Sanitizer::new();
    for input in ["con", "CON", "NUL", "com1", "Lpt5", "aux", "prn"] {
        let out = s.name(input);
        assert_eq!(out, fallback_name(input.as_bytes()), "{input}");
        assert_eq!(out.len(), FALLBACK_LEN);
    }

    // Different bytes, different digests, same branch
    assert_ne!(s.name("con"), s.name("CON"));
}

#[test]
fn reserved_name_with_suffix_is_kept() {
    let s = Sanitizer::new();
    assert_eq!(s.name("con.txt"), "con.txt");
    assert_eq!(s.clean("nul.tar.gz"), "nul.tar.gz");
}

#[test]
fn dot_names_fall_back() {
    let s = Sanitizer::new();
    assert_eq!(s.name("."), fallback_name(b"."));
    assert_eq!(s.name(".."), fallback_name(b".."));
    assert_eq!(s.clean(" . "), fallback_name(b" . "));
}

// ============================================================================
// Name
// ============================================================================

#[test]
fn name_replaces_reserved_characters() {
    assert_eq!(dashed().name(r#"what? "why" <how>"#), "what- -why- -how-");
    assert_eq!(Sanitizer::new().name("a|b\\c*d"), "abcd");
}

#[test]
fn name_replaces_control_runs_once() {
    assert_eq!(dashed().name("line\r\nbreak"), "line-break");
}

#[test]
fn name_handles_leading_and_trailing_dots() {
    let s = Sanitizer::new();
    assert_eq!(s.name("..config.."), ".config");
    assert_eq!(s.name("file   "), "file");
}

#[test]
fn name_is_idempotent_on_valid_names() {
    let s = Sanitizer::new();
    for input in ["photo.jpg", "my document (1).pdf", ".bashrc", "日本語のファイル.txt"] {
        let once = s.name(input);
        assert_eq!(once, input);
        assert_eq!(s.name(&once), once);
    }
}

#[test]
fn name_decodes_references_like_a_browser() {
    let s = Sanitizer::new();
    assert_eq!(s.name("a&amp b"), "a& b");
    // `<` is decoded, then removed as a reserved character
    assert_eq!(s.name("a&lt b"), "a b");
    assert_eq!(s.name("&#65"), "A");
    assert_eq!(s.name("a&#0;b"), "a\u{fffd}b");
    assert_eq!(s.name("a&#xD800;b"), "a\u{fffd}b");
    assert_eq!(s.name("a&#x80;b"), "a\u{20ac}b");
    assert_eq!(s.name("a&notit;b"), "a\u{ac}it;b");
}

#[test]
fn clean_keeps_windows_1252_references() {
    assert_eq!(Sanitizer::new().clean("price&#128;.txt"), "price\u{20ac}.txt");
}

// ============================================================================
// Clean
// ============================================================================

#[test]
fn clean_collapses_separator_runs() {
    let s = Sanitizer::new();
    assert_eq!(s.clean("a____b"), "a_b");
    assert_eq!(s.clean("a   b"), "ab");
    assert_eq!(s.clean("a__--b"), "a_-b");
    assert_eq!(s.clean("wow!!!.mp3"), "wow!.mp3");
    assert_eq!(s.clean("c++++.txt"), "c+.txt");
    assert_eq!(s.clean("archive..tar"), "archive.tar");
}

#[test]
fn clean_removes_invisible_characters() {
    let s = Sanitizer::new();
    assert_eq!(s.clean("in\u{200d}visible\u{2060}"), "invisible");
    assert_eq!(s.clean("no\u{a0}break"), "no break");
}

#[test]
fn clean_never_leaves_repeated_replacement() {
    let s = dashed();
    assert_eq!(s.clean("a??//**b"), "a-b");
    assert_eq!(s.clean("x\u{200b}\u{200b}\u{200b}y"), "x-y");
    assert_eq!(s.clean("end- . ."), "end-");
}

#[test]
fn clean_is_idempotent_on_clean_names() {
    let s = Sanitizer::new();
    for input in ["a_b-c+d.e!f", "holiday photos 2024.png", ".gitignore"] {
        let once = s.clean(input);
        assert_eq!(once, input);
        assert_eq!(s.clean(&once), once);
    }
}

// ============================================================================
// Length
// ============================================================================

#[test]
fn long_names_are_truncated_to_max_length() {
    let s = Sanitizer::new();
    let out = s.name(&"x".repeat(500));
    assert_eq!(out.len(), 240);

    let s = Sanitizer::with_options("", 100).unwrap();
    assert_eq!(s.clean(&"y".repeat(101)), "y".repeat(100));
}

#[test]
fn truncation_never_splits_characters() {
    let s = Sanitizer::new();
    // One ASCII byte then two-byte characters: byte 240 falls mid-character
    let input = format!("a{}", "é".repeat(200));
    let out = s.name(&input);
    assert_eq!(out.len(), 239);
    assert!(out.ends_with('é'));

    // Four-byte characters
    let out = s.name(&"🦀".repeat(100));
    assert_eq!(out.len(), 240);
    assert_eq!(out.chars().count(), 60);
}

#[test]
fn truncated_names_are_not_revalidated() {
    // The cut happens after the validity check, so it can produce an empty
    // or reserved name
    let s = Sanitizer::with_options("", 0).unwrap();
    assert_eq!(s.name("abc"), "");

    let s = Sanitizer::with_options("", 3).unwrap();
    assert_eq!(s.name("con.txt"), "con");
}

#[test]
fn fallback_ignores_small_max_length() {
    let s = Sanitizer::with_options("", 3).unwrap();
    let out = s.name("con");
    assert_eq!(out, fallback_name(b"con"));
    assert_eq!(out.len(), FALLBACK_LEN);
}

// ============================================================================
// Bytes and determinism
// ============================================================================

#[test]
fn ill_formed_bytes_are_repaired() {
    let s = dashed();
    assert_eq!(s.name_bytes(b"r\xe9sum\xe9.doc"), "r-sum-.doc");
    assert_eq!(s.apply_bytes(Mode::Clean, b"a\xff\xff\xffb"), "a-b");
}

#[test]
fn fallback_is_deterministic() {
    let s = Sanitizer::new();
    let a = s.clean("\u{200b}\u{200b}");
    let b = s.clean("\u{200b}\u{200b}");
    assert_eq!(a, b);
    assert_eq!(a, fallback_name("\u{200b}\u{200b}".as_bytes()));
}
