//! # tomlite
//!
//! A small, strict parser for a TOML subset: key/value pairs, dotted keys,
//! `[table]` headers, arrays, inline tables, comments, and single-, double-
//! and triple-quoted strings. Documents are parsed in a single forward pass
//! into an insertion-ordered [`Table`] of [`Value`]s, and structural
//! conflicts (a key assigned twice, a value where a table was declared) are
//! rejected eagerly at parse time.
//!
//! ## Quick Start
//!
//! ```rust
//! use tomlite::from_str;
//!
//! let doc = from_str(r#"
//! title = "demo"
//!
//! [server]
//! host = "localhost"
//! port = 8080
//! tags = ["web", "internal"]
//! "#)?;
//!
//! assert_eq!(doc.get("title").unwrap().as_str(), Some("demo"));
//!
//! let server = doc.get("server").unwrap().as_table().unwrap();
//! assert_eq!(server.get("port").unwrap().as_i32(), Some(8080));
//! # Ok::<(), tomlite::Error>(())
//! ```
//!
//! ## Dotted Keys and Headers Merge
//!
//! Dotted keys and `[table]` headers may extend the same table across
//! multiple declarations, as long as no individual key is assigned twice:
//!
//! ```rust
//! use tomlite::from_str;
//!
//! let doc = from_str("a.b = 1\na.c = 2")?;
//! let a = doc.get("a").unwrap().as_table().unwrap();
//! assert_eq!(a.len(), 2);
//!
//! assert!(from_str("a.b = 1\na.b = 2").is_err());
//! # Ok::<(), tomlite::Error>(())
//! ```
//!
//! ## Building Values
//!
//! The [`toml!`] macro builds expected trees for comparisons:
//!
//! ```rust
//! use tomlite::toml;
//!
//! let expected = toml!({ "name" = "demo", "sizes" = [1, 2, 3] });
//! assert!(expected.is_table());
//! ```
//!
//! ## Scope
//!
//! The supported language is deliberately a subset of TOML: no
//! `[[array-of-tables]]`, no whitespace around the dots of a dotted key, no
//! mixing of quoted and unquoted segments within one dotted key, and no
//! datetime values. Integer and float width is chosen by lexeme length
//! (over 10 characters widens to 64 bits), matching the behavior of the
//! configuration files this crate was built to read.

pub mod error;
mod escape;
pub mod lexer;
mod macros;
mod parser;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use lexer::{Lexer, Token};
pub use table::Table;
pub use value::Value;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Parses a document from a string.
///
/// # Examples
///
/// ```rust
/// let doc = tomlite::from_str("answer = 42")?;
/// assert_eq!(doc.get("answer").unwrap().as_i32(), Some(42));
/// # Ok::<(), tomlite::Error>(())
/// ```
///
/// # Errors
///
/// Returns the first [`Error`] encountered; nothing of the partially built
/// document is retained.
pub fn from_str(input: &str) -> Result<Table> {
    let mut lexer = Lexer::from_str(input);
    parser::parse_document(&mut lexer)
}

/// Parses a document from raw bytes, which must be valid UTF-8.
///
/// # Errors
///
/// Invalid UTF-8 is reported as [`Error::Io`], alongside the usual parse
/// errors.
pub fn from_slice(input: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(input).map_err(|e| Error::io(&e.to_string()))?;
    from_str(text)
}

/// Parses a document from any reader, line by line.
///
/// The reader is buffered internally; lines are pulled on demand, so only
/// the current line is held in memory.
pub fn from_reader<R: io::Read>(reader: R) -> Result<Table> {
    let mut lexer = Lexer::new(BufReader::new(reader).lines())?;
    parser::parse_document(&mut lexer)
}

/// Parses the document in the file at `path`.
///
/// # Errors
///
/// Failure to open or read the file is reported as [`Error::Io`].
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path).map_err(|e| Error::io(&e.to_string()))?;
    from_reader(file)
}
