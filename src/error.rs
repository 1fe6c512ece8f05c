//! Error types for TOML parsing.
//!
//! Every failure mode of the parser is a variant of the single [`Error`]
//! enum. Scan-level errors carry the offending character and a bounded
//! window (±8 characters) of the surrounding line so a bad document can be
//! located without line/column bookkeeping in the hot path.
//!
//! All errors are fatal to the parse in progress: the first one encountered
//! aborts and is returned to the caller. Nothing is downgraded to a default
//! value.
//!
//! ## Examples
//!
//! ```rust
//! use tomlite::{from_str, Error};
//!
//! let result = from_str("a = 1\na.b = 2");
//! assert!(matches!(result, Err(Error::KeyConflict { .. })));
//! ```

use thiserror::Error;

/// Number of characters of context kept on each side of an error position.
const CONTEXT_RADIUS: usize = 8;

/// Represents all possible errors that can occur while parsing a TOML
/// document.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The underlying line source could not be read.
    #[error("I/O failure while reading input: {0}")]
    Io(String),

    /// An unrecognized character followed a backslash during scanning.
    #[error("invalid control code '{found}' in: {window}")]
    InvalidControlCode { found: char, window: String },

    /// A malformed or truncated escape sequence was found while unescaping.
    #[error("malformed escape sequence ({msg}) in: {window}")]
    MalformedEscape { msg: String, window: String },

    /// A closing quote (or triple-quote terminator) was never found.
    #[error("unterminated string: no closing {terminator} in: {window}")]
    UnterminatedString { terminator: String, window: String },

    /// A closing `]` was never found before the input ended.
    #[error("unterminated array: ']' never found before end of input")]
    UnterminatedArray,

    /// A token violated the grammar for the parser's current state.
    #[error("unexpected {found} while expecting {expected}")]
    UnexpectedToken { found: String, expected: String },

    /// A literal could not be coerced to its inferred numeric type.
    #[error("malformed number '{lexeme}': {msg}")]
    MalformedNumber { lexeme: String, msg: String },

    /// A key path collided with an incompatible existing value.
    #[error("key conflict at '{key}': {msg}")]
    KeyConflict { key: String, msg: String },
}

impl Error {
    /// Creates an I/O error wrapping the display form of an underlying
    /// failure.
    pub(crate) fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an invalid-control-code error for the backslash at
    /// `backslash_index`. The reported character is the one following the
    /// backslash, or the backslash itself when it ends the line.
    pub(crate) fn invalid_control_code(chars: &[char], backslash_index: usize) -> Self {
        let index = (backslash_index + 1).min(chars.len().saturating_sub(1));
        Error::InvalidControlCode {
            found: chars.get(index).copied().unwrap_or('\\'),
            window: context_window(chars, index),
        }
    }

    pub(crate) fn malformed_escape(chars: &[char], index: usize, msg: &str) -> Self {
        Error::MalformedEscape {
            msg: msg.to_string(),
            window: context_window(chars, index),
        }
    }

    pub(crate) fn unterminated_string(chars: &[char], start: usize, terminator: &str) -> Self {
        Error::UnterminatedString {
            terminator: terminator.to_string(),
            window: context_window(chars, start),
        }
    }

    pub(crate) fn unexpected(
        found: impl std::fmt::Display,
        expected: impl std::fmt::Display,
    ) -> Self {
        Error::UnexpectedToken {
            found: found.to_string(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn malformed_number(lexeme: &str, msg: impl std::fmt::Display) -> Self {
        Error::MalformedNumber {
            lexeme: lexeme.to_string(),
            msg: msg.to_string(),
        }
    }

    pub(crate) fn key_conflict(key: &str, msg: impl std::fmt::Display) -> Self {
        Error::KeyConflict {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }
}

/// Extracts a bounded window of characters around `index` for error
/// messages.
fn context_window(chars: &[char], index: usize) -> String {
    let start = index.saturating_sub(CONTEXT_RADIUS);
    let end = (index + CONTEXT_RADIUS).min(chars.len());
    chars[start..end].iter().collect()
}

pub type Result<T> = std::result::Result<T, Error>;
