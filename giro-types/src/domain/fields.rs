//! Ordered request fields and their wire stringification.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ConfigError;

/// A typed request value.
///
/// Every value is declared as text, integer or boolean at the boundary and
/// stringified by a fixed rule: integers as decimal text, booleans as
/// `"0"`/`"1"`, text passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl FieldValue {
    /// Returns the string sent on the wire for this value.
    pub fn to_wire(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Bool(true) => "1".to_string(),
            FieldValue::Bool(false) => "0".to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Ordered list of request fields.
///
/// Insertion order is the canonicalization order fed to the request
/// signature, so it is kept explicitly rather than left to a map.
///
/// A field is stored only when its stringified value is non-blank. Setting
/// a name that is already present overwrites the value in place and keeps
/// the original position; setting a blank value never removes an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pairs: Vec<(String, String)>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, omitting blank values.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into().to_wire();
        if value.trim().is_empty() {
            return self;
        }
        match self.pairs.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((name.to_string(), value)),
        }
        self
    }

    /// Sets `name` when `value` is present; an absent value is omitted.
    pub fn set_opt<V: Into<FieldValue>>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    /// Field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Canonical signing input: every value in order, no names, no separators.
    pub fn canonical_string(&self) -> String {
        self.values().collect()
    }

    /// Fails with the first of `names` that is not present.
    pub fn require(&self, names: &[&'static str]) -> Result<(), ConfigError> {
        match names.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(ConfigError::MissingField(*missing)),
            None => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (name, value) in &self.pairs {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
