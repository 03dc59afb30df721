use super::Value;

use indexmap::IndexMap;
use serde::Serialize;
use std::ops;

/// A mapping from field name to value.
///
/// Field order follows insertion order, which keeps result rows in column
/// order and makes "first field" well defined.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    /// The field's value, if present and not blank.
    pub fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_blank())
    }

    /// True if every field present in both records holds the same value.
    pub fn agrees_with(&self, other: &Record) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| other.get(field).map_or(true, |other| other == value))
    }

    /// True if at least one field name appears in both records.
    pub fn overlaps(&self, other: &Record) -> bool {
        self.fields.keys().any(|field| other.contains_key(field))
    }

    /// Copies every field of `other` into `self`. Fields of `other` win.
    pub fn extend_from(&mut self, other: &Record) {
        for (field, value) in other {
            self.fields.insert(field.clone(), value.clone());
        }
    }

    /// Copies the fields of `other` that `self` does not have yet.
    pub fn fill_from(&mut self, other: &Record) {
        for (field, value) in other {
            if !self.fields.contains_key(field) {
                self.fields.insert(field.clone(), value.clone());
            }
        }
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.fields
    }
}

impl ops::Deref for Record {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl ops::DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<String, Value>> for Record {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }
}
