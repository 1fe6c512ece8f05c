//! String handling: escapes, single-quote verbatim semantics, and
//! triple-quoted multiline accumulation.

use tomlite::{from_str, Error};

fn parsed_str(input: &str, key: &str) -> String {
    from_str(input)
        .unwrap()
        .get(key)
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_double_quotes_process_escapes() {
    assert_eq!(parsed_str(r#"s = "line1\nline2""#, "s"), "line1\nline2");
    assert_eq!(parsed_str(r#"s = "tab\there""#, "s"), "tab\there");
    assert_eq!(parsed_str(r#"s = "say \"hi\"""#, "s"), "say \"hi\"");
    assert_eq!(parsed_str(r#"s = "a\\b""#, "s"), "a\\b");
}

#[test]
fn test_single_quotes_are_verbatim() {
    assert_eq!(parsed_str(r"s = 'line1\nline2'", "s"), r"line1\nline2");
    assert_eq!(parsed_str(r"s = 'C:\new\path'", "s"), r"C:\new\path");
}

#[test]
fn test_unicode_escapes() {
    assert_eq!(parsed_str(r#"s = "caf\u00e9""#, "s"), "caf\u{e9}");
    assert_eq!(parsed_str(r#"s = "\u0041\u0042C""#, "s"), "ABC");
}

#[test]
fn test_hash_inside_string_is_not_a_comment() {
    assert_eq!(parsed_str(r##"s = "a # b""##, "s"), "a # b");
}

#[test]
fn test_quote_of_the_other_kind_is_literal() {
    assert_eq!(parsed_str(r#"s = "it's fine""#, "s"), "it's fine");
    assert_eq!(parsed_str(r#"s = 'she said "hi"'"#, "s"), "she said \"hi\"");
}

#[test]
fn test_empty_strings() {
    assert_eq!(parsed_str(r#"s = """#, "s"), "");
    assert_eq!(parsed_str("s = ''", "s"), "");
}

#[test]
fn test_multiline_leading_blank_line_is_stripped() {
    let input = "s = \"\"\"\nfirst\nsecond\"\"\"";
    assert_eq!(parsed_str(input, "s"), "first\nsecond");
}

#[test]
fn test_multiline_content_on_opening_line() {
    let input = "s = \"\"\"first\nsecond\"\"\"";
    assert_eq!(parsed_str(input, "s"), "first\nsecond");
}

#[test]
fn test_multiline_odd_backslashes_continue_the_line() {
    // one backslash: continuation, no break
    assert_eq!(parsed_str("s = \"\"\"\nab\\\ncd\"\"\"", "s"), "abcd");
    // three backslashes: the odd one continues, the pair is content
    assert_eq!(
        parsed_str("s = \"\"\"\nab\\\\\\\ncd\"\"\"", "s"),
        "ab\\cd"
    );
}

#[test]
fn test_multiline_even_backslashes_keep_the_break() {
    assert_eq!(
        parsed_str("s = \"\"\"\nab\\\\\ncd\"\"\"", "s"),
        "ab\\\ncd"
    );
}

#[test]
fn test_multiline_single_quoted_is_verbatim() {
    assert_eq!(
        parsed_str("s = '''\nkeep \\t literal'''", "s"),
        r"keep \t literal"
    );
}

#[test]
fn test_multiline_escapes_in_double_quoted() {
    assert_eq!(
        parsed_str("s = \"\"\"\na\\tb\"\"\"", "s"),
        "a\tb"
    );
}

#[test]
fn test_invalid_control_code() {
    assert!(matches!(
        from_str(r#"s = "bad \q escape""#).unwrap_err(),
        Error::InvalidControlCode { .. }
    ));
    assert!(matches!(
        from_str(r"key\q = 1").unwrap_err(),
        Error::InvalidControlCode { found: 'q', .. }
    ));
}

#[test]
fn test_malformed_unicode_escape() {
    assert!(matches!(
        from_str(r#"s = "\u12""#).unwrap_err(),
        Error::MalformedEscape { .. }
    ));
    assert!(matches!(
        from_str(r#"s = "\uZZZZ""#).unwrap_err(),
        Error::MalformedEscape { .. }
    ));
}

#[test]
fn test_unterminated_string_carries_window() {
    let err = from_str(r#"s = "abcdefgh"#).unwrap_err();
    match err {
        Error::UnterminatedString { window, .. } => {
            assert!(window.contains("abcdefgh"), "window was: {window}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
