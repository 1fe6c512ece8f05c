//! Insertion-ordered tables and the merge engine.
//!
//! [`Table`] is the document model: a map from key segments to [`Value`]s
//! that preserves first-declaration order. Insertion goes through dotted
//! paths ([`Table::insert`]), materializing intermediate tables on demand;
//! when the final segment lands on an existing table and the incoming value
//! is also a table, the two are merged recursively with the incoming
//! instance as the canonical result. Any other collision is a
//! [`KeyConflict`](crate::Error::KeyConflict).
//!
//! ```rust
//! use tomlite::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("server.host", Value::from("localhost")).unwrap();
//! table.insert("server.port", Value::from(8080)).unwrap();
//!
//! let server = table.get("server").unwrap().as_table().unwrap();
//! assert_eq!(server.get("host").unwrap().as_str(), Some("localhost"));
//! ```

use crate::error::{Error, Result};
use crate::value::Value;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// An ordered map of keys to values.
///
/// Iteration yields entries in the order their keys were first declared,
/// regardless of later merges into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    entries: IndexMap<String, Value>,
}

impl Table {
    /// Creates a new, empty table.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Creates a new, empty table with at least the specified capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns the value bound to a single key segment, if any.
    ///
    /// This is a flat lookup; it does not interpret dots.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if the table binds the given key segment.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries in the table.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns an iterator over the values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Returns an iterator over key/value pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Binds `value` at the path named by `dotted_key`.
    ///
    /// The key is split on `.` and all segments but the last are resolved
    /// as nested tables, created empty where absent. If an intermediate
    /// segment resolves to a non-table value, the insert fails. At the
    /// final segment:
    ///
    /// - an absent key is bound directly;
    /// - an existing table meeting an incoming table is merged, with the
    ///   incoming table becoming the stored instance;
    /// - any other collision is a [`KeyConflict`](Error::KeyConflict).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlite::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.insert("a.b", Value::from(1)).unwrap();
    /// table.insert("a.c", Value::from(2)).unwrap();
    /// assert!(table.insert("a.b", Value::from(3)).is_err());
    /// ```
    pub fn insert(&mut self, dotted_key: &str, value: Value) -> Result<()> {
        let mut segments = dotted_key.split('.');
        // split never yields zero items
        let mut last = segments.next().unwrap_or(dotted_key);
        let mut current = self;
        for next in segments {
            let slot = current
                .entries
                .entry(last.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            current = match slot {
                Value::Table(table) => table,
                _ => {
                    return Err(Error::key_conflict(
                        dotted_key,
                        format!("'{last}' already holds a non-table value"),
                    ))
                }
            };
            last = next;
        }

        match current.entries.get_mut(last) {
            None => {
                current.entries.insert(last.to_string(), value);
                Ok(())
            }
            Some(slot) => {
                if !slot.is_table() {
                    return Err(Error::key_conflict(
                        dotted_key,
                        "the key is already bound to a value",
                    ));
                }
                match value {
                    Value::Table(mut incoming) => {
                        let old = std::mem::replace(slot, Value::Table(Table::new()));
                        if let Value::Table(existing) = old {
                            existing.merge_into(&mut incoming)?;
                        }
                        *slot = Value::Table(incoming);
                        Ok(())
                    }
                    _ => Err(Error::key_conflict(
                        dotted_key,
                        "a table is already declared here",
                    )),
                }
            }
        }
    }

    /// Folds this table's entries into `target`.
    ///
    /// Entries absent from `target` move over directly. Where both sides
    /// hold tables the merge recurses, keeping `target`'s instance. Any
    /// other overlap fails.
    fn merge_into(self, target: &mut Table) -> Result<()> {
        for (key, value) in self.entries {
            match target.entries.get_mut(&key) {
                None => {
                    target.entries.insert(key, value);
                }
                Some(Value::Table(existing)) => match value {
                    Value::Table(incoming) => incoming.merge_into(existing)?,
                    _ => {
                        return Err(Error::key_conflict(
                            &key,
                            "a table is already declared here",
                        ))
                    }
                },
                Some(_) => {
                    return Err(Error::key_conflict(
                        &key,
                        "the key is already bound to a value",
                    ))
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.entries
                .iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
