//! Dynamic value representation for parsed TOML documents.
//!
//! This module provides the [`Value`] enum, a closed set of variants for
//! everything a document can hold: six primitive kinds, arrays, and tables.
//! Integer and float width follows the declaration, not the magnitude: a
//! short numeric lexeme becomes [`Value::Int`]/[`Value::Float`], a long one
//! [`Value::Long`]/[`Value::Double`] (see [`Value::from_lexeme`]).
//!
//! ## Type Checking
//!
//! ```rust
//! use tomlite::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_int());
//! assert!(!value.is_str());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use tomlite::Value;
//!
//! let value = Value::from("hello");
//! assert_eq!(value.as_str(), Some("hello"));
//! assert_eq!(value.as_bool(), None);
//! ```

use crate::error::{Error, Result};
use crate::table::Table;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Length above which an integer lexeme is widened to 64 bits and a float
/// lexeme to an f64. A proxy for "fits in 32 bits" based on string length,
/// not numeric magnitude; kept as-is for compatibility.
const WIDE_LEXEME_LEN: usize = 10;

/// A dynamically-typed representation of any valid document value.
///
/// # Examples
///
/// ```rust
/// use tomlite::Value;
///
/// let num = Value::Int(42);
/// let text = Value::String("hello".to_string());
///
/// assert!(num.is_int());
/// assert!(text.is_str());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Array(Vec<Value>),
    Table(Table),
}

impl Value {
    /// Coerces a raw lexeme into a primitive value.
    ///
    /// Quoted lexemes are always strings. Unquoted lexemes have `_` digit
    /// separators stripped, then: case-insensitive `true`/`false` become
    /// booleans; lexemes containing `.` become [`Value::Float`] when the
    /// stripped length is at most 10 and [`Value::Double`] otherwise; all
    /// remaining lexemes become [`Value::Int`] or [`Value::Long`] by the
    /// same length split.
    pub(crate) fn from_lexeme(lexeme: &str, quoted: bool) -> Result<Value> {
        if quoted {
            return Ok(Value::String(lexeme.to_string()));
        }
        let v: String = lexeme.chars().filter(|&c| c != '_').collect();

        if v.eq_ignore_ascii_case("true") {
            return Ok(Value::Bool(true));
        }
        if v.eq_ignore_ascii_case("false") {
            return Ok(Value::Bool(false));
        }

        if v.contains('.') {
            let parsed = if v.len() > WIDE_LEXEME_LEN {
                v.parse::<f64>().map(Value::Double)
            } else {
                v.parse::<f32>().map(Value::Float)
            };
            parsed.map_err(|e| Error::malformed_number(&v, e))
        } else if v.len() > WIDE_LEXEME_LEN {
            v.parse::<i64>()
                .map(Value::Long)
                .map_err(|e| Error::malformed_number(&v, e))
        } else {
            v.parse::<i32>()
                .map(Value::Int)
                .map_err(|e| Error::malformed_number(&v, e))
        }
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a 32-bit integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns `true` if the value is a 64-bit integer.
    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Value::Long(_))
    }

    /// Returns `true` if the value is a 32-bit float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a 64-bit float.
    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a 32-bit integer, returns it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is an integer of either width, returns it widened to
    /// 64 bits. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlite::Value;
    ///
    /// assert_eq!(Value::Int(42).as_i64(), Some(42));
    /// assert_eq!(Value::Long(1 << 40).as_i64(), Some(1 << 40));
    /// assert_eq!(Value::Double(42.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// If the value is a 32-bit float, returns it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a float of either width, returns it widened to 64
    /// bits. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f64::from(*f)),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// If the value is an array, returns it as a slice. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a table, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => {
                write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(l) => write!(f, "{}", l),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Double(d) => write!(f, "{}", d),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Table(table) => write!(f, "{}", table),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i32(*i),
            Value::Long(l) => serializer.serialize_i64(*l),
            Value::Float(f) => serializer.serialize_f32(*f),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}
