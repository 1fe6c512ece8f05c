//! Escape-aware scanning and unescaping.
//!
//! The scanner needs to find closing quotes in text that may contain
//! backslash escapes without ever matching a pattern character that sits
//! inside an escape unit. The matchers here walk a line left to right and,
//! at each backslash, consume exactly one following character as part of
//! the escape, so `\"` never terminates a double-quoted string.
//!
//! [`unescape`] then rewrites an escaped span into its literal content by
//! building into a fresh buffer.

use crate::error::{Error, Result};

/// Maps an escape letter to the literal character it denotes. `u` is not in
/// this table; unicode escapes are decoded separately.
fn control_code(c: char) -> Option<char> {
    Some(match c {
        '"' => '"',
        '\'' => '\'',
        '\\' => '\\',
        't' => '\t',
        'b' => '\u{0008}',
        'n' => '\n',
        'r' => '\r',
        'f' => '\u{000C}',
        _ => return None,
    })
}

/// Returns whether `c` is meaningful after a backslash. The check is weak
/// for `u`: it does not verify that 4 hex digits follow.
pub(crate) fn is_escape_letter(c: char) -> bool {
    c == 'u' || control_code(c).is_some()
}

/// Finds the nearest occurrence of `pattern` in an escaped span, validating
/// control codes along the way.
///
/// A single-backslash pattern is a caller error: it is ambiguous whether it
/// denotes an escape introducer or a literal. Patterns must be either ≥2
/// characters or a single non-backslash character.
pub(crate) fn find_escaped(
    lookup: &[char],
    start: usize,
    pattern: &[char],
) -> Result<Option<usize>> {
    debug_assert!(pattern != ['\\'], "a lone backslash pattern is ambiguous");
    scan(lookup, start, pattern, true)
}

/// Same scan as [`find_escaped`] but silently tolerates unrecognized
/// escapes. Only for spans whose validity was already established upstream,
/// e.g. when searching for a multiline terminator where trailing backslash
/// runs are parity-checked separately.
pub(crate) fn find_escaped_unchecked(lookup: &[char], start: usize, pattern: &[char]) -> Option<usize> {
    debug_assert!(pattern != ['\\'], "a lone backslash pattern is ambiguous");
    match scan(lookup, start, pattern, false) {
        Ok(found) => found,
        // the unchecked scan never reports control-code errors
        Err(_) => None,
    }
}

/// Checked scan that treats not-found as a hard failure: the pattern is a
/// string terminator that was required to exist.
pub(crate) fn find_escaped_strong(lookup: &[char], start: usize, pattern: &[char]) -> Result<usize> {
    match find_escaped(lookup, start, pattern)? {
        Some(index) => Ok(index),
        None => {
            let terminator: String = pattern.iter().collect();
            Err(Error::unterminated_string(lookup, start, &terminator))
        }
    }
}

fn scan(lookup: &[char], start: usize, pattern: &[char], checked: bool) -> Result<Option<usize>> {
    let p_len = pattern.len();
    let len = lookup.len();
    if p_len == 0 || start >= len {
        return Ok(None);
    }

    let mut i = start;
    while i < len {
        let c = lookup[i];
        if c == pattern[0] && (p_len == 1 || (i + p_len <= len && lookup[i + 1..i + p_len] == pattern[1..])) {
            return Ok(Some(i));
        }
        // not `else`: a pattern mismatch on a backslash still opens an escape
        if c == '\\' {
            match lookup.get(i + 1) {
                Some(&next) if is_escape_letter(next) => i += 1,
                _ if checked => return Err(Error::invalid_control_code(lookup, i)),
                _ => {}
            }
        }
        i += 1;
    }
    Ok(None)
}

/// Finds the nearest occurrence of `pattern` with no escape handling at
/// all, for single-quoted (literal) strings.
pub(crate) fn find_plain(lookup: &[char], start: usize, pattern: &[char]) -> Option<usize> {
    let p_len = pattern.len();
    let len = lookup.len();
    if p_len == 0 || start >= len {
        return None;
    }
    (start..len).find(|&i| {
        lookup[i] == pattern[0]
            && (p_len == 1 || (i + p_len <= len && lookup[i + 1..i + p_len] == pattern[1..]))
    })
}

/// Plain scan that treats not-found as a hard failure.
pub(crate) fn find_plain_strong(lookup: &[char], start: usize, pattern: &[char]) -> Result<usize> {
    match find_plain(lookup, start, pattern) {
        Some(index) => Ok(index),
        None => {
            let terminator: String = pattern.iter().collect();
            Err(Error::unterminated_string(lookup, start, &terminator))
        }
    }
}

/// Replaces each escape sequence in `input` with its literal character.
///
/// `\uXXXX` takes exactly 4 hex digits forming a code unit, accumulated by
/// hand. Fails with [`Error::MalformedEscape`] on a dangling backslash, an
/// unrecognized escape letter, or a short/non-hex unicode escape.
pub(crate) fn unescape(input: &str) -> Result<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }
        let next = match chars.get(i + 1) {
            Some(&next) => next,
            None => return Err(Error::malformed_escape(&chars, i, "dangling backslash")),
        };
        if next == 'u' {
            let mut code: u32 = 0;
            for j in 0..4 {
                let digit = match chars.get(i + 2 + j).copied() {
                    Some(h) if h.is_ascii_digit() => h as u32 - '0' as u32,
                    Some(h) if ('a'..='f').contains(&h) => h as u32 - 'a' as u32 + 10,
                    Some(h) if ('A'..='F').contains(&h) => h as u32 - 'A' as u32 + 10,
                    _ => {
                        return Err(Error::malformed_escape(
                            &chars,
                            i,
                            "unicode escape requires 4 hex digits",
                        ))
                    }
                };
                code = code * 16 + digit;
            }
            match char::from_u32(code) {
                Some(decoded) => out.push(decoded),
                // 0xD800..=0xDFFF: a lone surrogate code unit
                None => return Err(Error::malformed_escape(&chars, i, "invalid code unit")),
            }
            i += 6;
        } else if let Some(literal) = control_code(next) {
            out.push(literal);
            i += 2;
        } else {
            return Err(Error::malformed_escape(&chars, i + 1, "unknown control code"));
        }
    }
    Ok(out)
}
