//! Structured key-value side-table merged into records at finalize
//!
//! This module provides:
//! - `ExtraValue`: typed field values
//! - `LogExtra`: an insertion-ordered collection of fields

use serde::{Deserialize, Serialize};

use super::encoding::{escape_into, EscapeMode};

/// Value type for side-table fields.
///
/// Numeric and boolean values take the escape-exempt rendering path, the
/// same as directly appended numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    String(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl ExtraValue {
    /// Encode this value into `dst` as record text.
    pub(crate) fn encode_into(&self, dst: &mut String) {
        use std::fmt::Write;

        match self {
            ExtraValue::String(s) => escape_into(dst, s, EscapeMode::Value),
            ExtraValue::Signed(i) => {
                let _ = write!(dst, "{}", i);
            }
            ExtraValue::Unsigned(u) => {
                let _ = write!(dst, "{}", u);
            }
            ExtraValue::Float(f) => {
                let _ = write!(dst, "{}", f);
            }
            ExtraValue::Bool(b) => dst.push(if *b { '1' } else { '0' }),
        }
    }
}

impl From<String> for ExtraValue {
    fn from(s: String) -> Self {
        ExtraValue::String(s)
    }
}

impl From<&str> for ExtraValue {
    fn from(s: &str) -> Self {
        ExtraValue::String(s.to_string())
    }
}

impl From<i32> for ExtraValue {
    fn from(i: i32) -> Self {
        ExtraValue::Signed(i64::from(i))
    }
}

impl From<i64> for ExtraValue {
    fn from(i: i64) -> Self {
        ExtraValue::Signed(i)
    }
}

impl From<u32> for ExtraValue {
    fn from(u: u32) -> Self {
        ExtraValue::Unsigned(u64::from(u))
    }
}

impl From<u64> for ExtraValue {
    fn from(u: u64) -> Self {
        ExtraValue::Unsigned(u)
    }
}

impl From<usize> for ExtraValue {
    fn from(u: usize) -> Self {
        ExtraValue::Unsigned(u as u64)
    }
}

impl From<f32> for ExtraValue {
    fn from(f: f32) -> Self {
        ExtraValue::Float(f64::from(f))
    }
}

impl From<f64> for ExtraValue {
    fn from(f: f64) -> Self {
        ExtraValue::Float(f)
    }
}

impl From<bool> for ExtraValue {
    fn from(b: bool) -> Self {
        ExtraValue::Bool(b)
    }
}

/// Insertion-ordered key-value side-table.
///
/// Keys keep the order of first insertion so record layout is
/// deterministic; setting an existing key replaces its value in place.
///
/// # Example
///
/// ```
/// use tskv_logger::LogExtra;
///
/// let extra = LogExtra::new()
///     .with("http.method", "GET")
///     .with("attempts", 3u32);
/// assert_eq!(extra.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogExtra {
    fields: Vec<(String, ExtraValue)>,
}

impl LogExtra {
    /// Create an empty side-table.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field, consuming and returning the table for chaining.
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ExtraValue>,
    {
        self.set(key, value);
        self
    }

    /// Set a field. If the key already exists its value is replaced.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<ExtraValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Merge all fields of `other` into this table (last write wins).
    pub fn extend(&mut self, other: LogExtra) {
        for (key, value) in other.fields {
            self.set(key, value);
        }
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LogExtra
where
    K: Into<String>,
    V: Into<ExtraValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extra = LogExtra::new();
        for (key, value) in iter {
            extra.set(key, value);
        }
        extra
    }
}
