//! Recursive-descent document parsing.
//!
//! [`parse_document`] drives the lexer one token at a time through a
//! four-state cycle (key, equals, value, delimiter) per key/value pair. At
//! top level the pair delimiter is the synthetic `\n` mark and `[table]`
//! headers are legal; inside inline tables the delimiter is `,`, headers
//! are illegal, and `}` closes the block.
//!
//! A committed `[table]` header does not mutate hidden state: it becomes a
//! dotted-path prefix threaded through subsequent top-level inserts, so
//! every write still lands through [`Table::insert`] at the root and the
//! merge rules apply uniformly.

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::table::Table;
use crate::value::Value;
use std::io;

/// Position in the key/value pair cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Key,
    Equal,
    Value,
    Delimiter,
}

impl State {
    /// Advances to the next position in the cycle.
    fn cycle(self) -> State {
        match self {
            State::Key => State::Equal,
            State::Equal => State::Value,
            State::Value => State::Delimiter,
            State::Delimiter => State::Key,
        }
    }

    /// What the grammar wants to see in this state, for error messages.
    fn expecting(self) -> &'static str {
        match self {
            State::Key => "a key",
            State::Equal => "'='",
            State::Value => "a value",
            State::Delimiter => "a delimiter",
        }
    }
}

/// Parses a whole document into its root table.
pub(crate) fn parse_document<I>(lexer: &mut Lexer<I>) -> Result<Table>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut root = Table::new();
    parse_block(lexer, '\n', true, &mut root)?;
    Ok(root)
}

/// Parses one block of key/value pairs into `context`.
///
/// `delimiter` separates pairs; `top_level` enables `[table]` headers and
/// makes blank lines transparent only between pairs. Inline-table blocks
/// (`top_level == false`) end at `}`, which is accepted in place of a key
/// or a delimiter.
fn parse_block<I>(
    lexer: &mut Lexer<I>,
    delimiter: char,
    top_level: bool,
    context: &mut Table,
) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut state = State::Key;
    let mut key: Option<String> = None;
    // committed [table] header, as a dotted prefix for subsequent inserts
    let mut header: Option<String> = None;
    let mut declaring = false;
    let mut declared: Option<String> = None;

    while let Some(token) = lexer.next_token()? {
        let (text, was_quoted) = match token {
            Token::Quoted(text) => (text, true),
            Token::Unquoted(text) => (text, false),
            Token::Mark(mark) => {
                // blank line at top level, or cosmetic break inside a block
                if mark == '\n' && (!top_level || state == State::Key) {
                    continue;
                }
                match state {
                    State::Equal => {
                        if declaring {
                            return Err(Error::unexpected(Token::Mark(mark), "a table name"));
                        }
                        if mark != '=' {
                            return Err(Error::unexpected(Token::Mark(mark), state.expecting()));
                        }
                    }
                    State::Delimiter => {
                        if !top_level && mark == '}' {
                            return Ok(());
                        }
                        if mark != delimiter {
                            return Err(Error::unexpected(
                                Token::Mark(mark),
                                format!("'{}'", delimiter.escape_default()),
                            ));
                        }
                        if declaring {
                            let path = declared
                                .take()
                                .ok_or_else(|| Error::unexpected("']'", "a table name"))?;
                            // an empty table claims the path now; later
                            // headers for the same path merge into it
                            context.insert(&path, Value::Table(Table::new()))?;
                            header = Some(path);
                            declaring = false;
                        }
                    }
                    State::Key => {
                        if !top_level && mark == '}' {
                            return Ok(());
                        }
                        if top_level && mark == '[' {
                            declaring = true;
                        } else {
                            return Err(Error::unexpected(Token::Mark(mark), state.expecting()));
                        }
                    }
                    State::Value => {
                        if declaring {
                            if mark != ']' {
                                return Err(Error::unexpected(
                                    Token::Mark(mark),
                                    "']' to close the table header",
                                ));
                            }
                        } else {
                            let value = match mark {
                                '[' => Value::Array(parse_array(lexer)?),
                                '{' => {
                                    let mut inline = Table::new();
                                    parse_block(lexer, ',', false, &mut inline)?;
                                    Value::Table(inline)
                                }
                                _ => {
                                    return Err(Error::unexpected(
                                        Token::Mark(mark),
                                        state.expecting(),
                                    ))
                                }
                            };
                            commit(context, &header, &key, value)?;
                        }
                    }
                }
                state = state.cycle();
                continue;
            }
        };
        match state {
            State::Key => key = Some(text),
            State::Value => {
                if declaring {
                    return Err(Error::unexpected(
                        restore(text, was_quoted),
                        "']' to close the table header",
                    ));
                }
                let value = Value::from_lexeme(&text, was_quoted)?;
                commit(context, &header, &key, value)?;
            }
            State::Equal => {
                if !declaring {
                    return Err(Error::unexpected(restore(text, was_quoted), state.expecting()));
                }
                declared = Some(text);
            }
            State::Delimiter => {
                return Err(Error::unexpected(restore(text, was_quoted), state.expecting()));
            }
        }
        state = state.cycle();
    }

    if !top_level {
        return Err(Error::unexpected(
            "end of input",
            "'}' to close the inline table",
        ));
    }
    if !(state == State::Key || state == State::Delimiter) {
        return Err(Error::unexpected("end of input", state.expecting()));
    }
    Ok(())
}

/// Rebuilds a text token for an error message.
fn restore(text: String, was_quoted: bool) -> Token {
    if was_quoted {
        Token::Quoted(text)
    } else {
        Token::Unquoted(text)
    }
}

/// Inserts a completed pair at the root, prefixing the key with the
/// current `[table]` header path, if any.
fn commit(context: &mut Table, header: &Option<String>, key: &Option<String>, value: Value) -> Result<()> {
    let key = key
        .as_deref()
        .ok_or_else(|| Error::unexpected("a value", "a key before it"))?;
    match header {
        Some(prefix) => context.insert(&format!("{prefix}.{key}"), value),
        None => context.insert(key, value),
    }
}

/// Parses a `[...]` array literal, the opening `[` already consumed.
///
/// Elements are `,`-separated; line breaks are cosmetic. `]` closes the
/// array wherever it appears, so a trailing comma is tolerated; a comma
/// with no element before it is not.
fn parse_array<I>(lexer: &mut Lexer<I>) -> Result<Vec<Value>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut elements = Vec::new();
    let mut expect_separator = false;

    while let Some(token) = lexer.next_token()? {
        match token {
            Token::Quoted(ref text) => {
                if expect_separator {
                    return Err(Error::unexpected(&token, "',' between array elements"));
                }
                elements.push(Value::from_lexeme(text, true)?);
                expect_separator = true;
            }
            Token::Unquoted(ref text) => {
                if expect_separator {
                    return Err(Error::unexpected(&token, "',' between array elements"));
                }
                elements.push(Value::from_lexeme(text, false)?);
                expect_separator = true;
            }
            Token::Mark('[') => {
                if expect_separator {
                    return Err(Error::unexpected(token, "',' between array elements"));
                }
                elements.push(Value::Array(parse_array(lexer)?));
                expect_separator = true;
            }
            Token::Mark('{') => {
                if expect_separator {
                    return Err(Error::unexpected(token, "',' between array elements"));
                }
                let mut inline = Table::new();
                parse_block(lexer, ',', false, &mut inline)?;
                elements.push(Value::Table(inline));
                expect_separator = true;
            }
            Token::Mark(',') => {
                if !expect_separator {
                    return Err(Error::unexpected(token, "an array element before ','"));
                }
                expect_separator = false;
            }
            Token::Mark(']') => return Ok(elements),
            Token::Mark('\n') => {}
            Token::Mark(_) => {
                return Err(Error::unexpected(token, "an array element, ',' or ']'"));
            }
        }
    }

    Err(Error::UnterminatedArray)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Table> {
        parse_document(&mut Lexer::from_str(input))
    }

    #[test]
    fn test_flat_pairs() {
        let doc = parse("a = 1\nb = \"two\"").unwrap();
        assert_eq!(doc.get("a").unwrap().as_i32(), Some(1));
        assert_eq!(doc.get("b").unwrap().as_str(), Some("two"));
    }

    #[test]
    fn test_blank_lines_between_pairs() {
        let doc = parse("a = 1\n\n\nb = 2").unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_header_redirects_following_pairs() {
        let doc = parse("[server]\nhost = \"local\"\nport = 80").unwrap();
        let server = doc.get("server").unwrap().as_table().unwrap();
        assert_eq!(server.get("host").unwrap().as_str(), Some("local"));
        assert_eq!(server.get("port").unwrap().as_i32(), Some(80));
    }

    #[test]
    fn test_dotted_header() {
        let doc = parse("[a.b]\nc = 1").unwrap();
        let b = doc
            .get("a")
            .unwrap()
            .as_table()
            .unwrap()
            .get("b")
            .unwrap()
            .as_table()
            .unwrap();
        assert_eq!(b.get("c").unwrap().as_i32(), Some(1));
    }

    #[test]
    fn test_header_persists_until_next_header() {
        let doc = parse("[x]\nk = 1\n[y]\nj = 2").unwrap();
        assert!(doc.get("x").unwrap().as_table().unwrap().contains_key("k"));
        assert!(doc.get("y").unwrap().as_table().unwrap().contains_key("j"));
    }

    #[test]
    fn test_empty_inline_table() {
        let doc = parse("t = {}").unwrap();
        assert!(doc.get("t").unwrap().as_table().unwrap().is_empty());
    }

    #[test]
    fn test_inline_table_trailing_comma() {
        let doc = parse("t = {a = 1,}").unwrap();
        assert_eq!(doc.get("t").unwrap().as_table().unwrap().len(), 1);
    }

    #[test]
    fn test_inline_table_nested() {
        let doc = parse("t = {a = 1, b = {c = 2}}").unwrap();
        let t = doc.get("t").unwrap().as_table().unwrap();
        let b = t.get("b").unwrap().as_table().unwrap();
        assert_eq!(b.get("c").unwrap().as_i32(), Some(2));
    }

    #[test]
    fn test_array_spanning_lines() {
        let doc = parse("a = [\n1,\n2,\n3\n]").unwrap();
        assert_eq!(doc.get("a").unwrap().as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_array_trailing_comma() {
        let doc = parse("a = [1, 2, 3,]").unwrap();
        assert_eq!(doc.get("a").unwrap().as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_array_double_comma_fails() {
        assert!(matches!(
            parse("a = [1,,2]").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_array_leading_comma_fails() {
        assert!(matches!(
            parse("a = [,]").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_array_missing_separator_fails() {
        assert!(matches!(
            parse("a = [1 2]").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_unterminated_array() {
        assert!(matches!(
            parse("a = [1, 2").unwrap_err(),
            Error::UnterminatedArray
        ));
    }

    #[test]
    fn test_unclosed_inline_table() {
        assert!(matches!(
            parse("t = {a = 1").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_header_inside_inline_table_fails() {
        assert!(matches!(
            parse("t = {[x]}").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_two_values_on_one_line_fail() {
        assert!(matches!(
            parse("a = 1 2").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_header_with_two_names_fails() {
        assert!(matches!(
            parse("[a b]\nk = 1").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_missing_equals_fails() {
        assert!(matches!(
            parse("a 1").unwrap_err(),
            Error::UnexpectedToken { .. }
        ));
    }
}
