//! Projection of argument and constraint records across a connection.
//!
//! A [`Relate`] map renames fields of one table's record into the fields
//! another table expects. Together with [`merge`] it threads identifiers,
//! such as a freshly generated key, from one action into the next without
//! either side knowing the other's schema.

use molecule_core::stmt::{Record, Value};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel source field that passes the whole record through.
pub const ALL: &str = "ALL";

/// A field rename map, `source field -> target field`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relate(IndexMap<String, String>);

impl Relate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map passing every field through unchanged.
    pub fn all() -> Self {
        let mut relate = Self::new();
        relate.0.insert(ALL.to_string(), ALL.to_string());
        relate
    }

    /// Adds a `source -> target` rename.
    pub fn field(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.0.insert(source.into(), target.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all(&self) -> bool {
        self.0.contains_key(ALL)
    }

    /// The declared renames, without the passthrough sentinel.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .filter(|(source, _)| source.as_str() != ALL)
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }

    /// Target field names of the declared renames.
    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.pairs().map(|(_, target)| target)
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for Relate {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(source, target)| (source.into(), target.into()))
                .collect(),
        )
    }
}

/// Projects one record through `relate`.
///
/// Every source field found in `record` is copied under its target name. A
/// copied value that is itself a record is spliced into the result instead
/// of nested. With the `ALL` sentinel the whole record passes through first
/// and declared renames win on collision.
///
/// Returns `None` when the map is empty or nothing matched.
pub fn project_record(relate: &Relate, record: &Record) -> Option<Record> {
    if relate.is_empty() {
        return None;
    }

    let mut ret = if relate.is_all() {
        record.clone()
    } else {
        Record::new()
    };

    for (source, target) in relate.pairs() {
        match record.get(source) {
            Some(Value::Record(nested)) => ret.extend_from(nested),
            Some(value) => {
                ret.insert(target, value.clone());
            }
            None => {}
        }
    }

    (!ret.is_empty()).then_some(ret)
}

/// Projects a record, or every record of a list, through `relate`.
pub fn project(relate: &Relate, args: &Value) -> Option<Value> {
    match args {
        Value::Record(record) => project_record(relate, record).map(Value::Record),
        Value::List(items) => {
            let projected: Vec<_> = items
                .iter()
                .filter_map(|item| project(relate, item))
                .collect();

            (!projected.is_empty()).then_some(Value::List(projected))
        }
        _ => None,
    }
}

/// Copies argument records so later mutation never reaches the original.
pub fn clone_args(args: Option<&Value>) -> Option<Value> {
    args.filter(|args| !args.is_blank()).cloned()
}

/// Combines two argument values.
///
/// A missing or blank side yields the other. Two records are unioned; with
/// `force` the fields of `b` win on collision. Without `force`, records that
/// disagree on a shared field are kept apart as a two-element list so the
/// ambiguity survives. Lists broadcast element-wise and the result is
/// flattened.
pub fn merge(a: Option<Value>, b: Option<Value>, force: bool) -> Option<Value> {
    let a = a.filter(|a| !a.is_blank());
    let b = b.filter(|b| !b.is_blank());

    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(a), Some(b)) => Some(merge_values(a, b, force)),
    }
}

/// [`merge`] for constraint records, which are always single records.
pub fn merge_records(a: Option<Record>, b: Option<Record>, force: bool) -> Option<Record> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(mut a), Some(b)) => {
            if force {
                a.extend_from(&b);
            } else {
                a.fill_from(&b);
            }
            Some(a)
        }
    }
}

fn merge_values(a: Value, b: Value, force: bool) -> Value {
    match (a, b) {
        (Value::List(items), b) => flatten(
            items
                .into_iter()
                .map(|item| merge_values(item, b.clone(), force)),
        ),
        (a, Value::List(items)) => flatten(
            items
                .into_iter()
                .map(|item| merge_values(a.clone(), item, force)),
        ),
        (Value::Record(mut a), Value::Record(b)) => {
            if force || a.agrees_with(&b) {
                a.extend_from(&b);
                Value::Record(a)
            } else {
                Value::List(vec![Value::Record(a), Value::Record(b)])
            }
        }
        (a, b) if force || a == b => b,
        (a, b) => Value::List(vec![a, b]),
    }
}

fn flatten(items: impl Iterator<Item = Value>) -> Value {
    let mut ret = vec![];

    for item in items {
        match item {
            Value::List(nested) => ret.extend(nested),
            item => ret.push(item),
        }
    }

    Value::List(ret)
}

/// Finds the nested input stored under `marker`.
///
/// For a list of records the nested values of every element are collected.
pub fn marker_value(args: &Value, marker: &str) -> Option<Value> {
    match args {
        Value::Record(record) => record.present(marker).cloned(),
        Value::List(items) => {
            let found: Vec<_> = items
                .iter()
                .filter_map(|item| marker_value(item, marker))
                .collect();

            match found.len() {
                0 => None,
                1 => found.into_iter().next(),
                _ => Some(flatten(found.into_iter())),
            }
        }
        _ => None,
    }
}

/// Finds a nested constraint record stored under `marker`.
pub fn marker_record(extra: &Record, marker: &str) -> Option<Record> {
    extra.present(marker).and_then(Value::as_record).cloned()
}

/// Removes the given fields from every record of `args`.
pub fn strip_fields(mut args: Value, fields: &[String]) -> Value {
    for record in args.records_mut() {
        for field in fields {
            record.remove(field);
        }
    }
    args
}

/// Spreads the rows of a multi-row prepare over the arguments, one record
/// per row.
///
/// Arguments holding one record per row are paired with the rows by
/// position. Otherwise the first argument record is copied onto every row.
/// Row fields win on conflict.
pub fn fan_out(args: Option<Value>, rows: Vec<Record>) -> Value {
    let base = args.map(Value::into_records).unwrap_or_default();
    let paired = base.len() == rows.len();

    let fanned = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let mut record = base
                .get(if paired { index } else { 0 })
                .cloned()
                .unwrap_or_default();
            record.extend_from(&row);
            Value::Record(record)
        })
        .collect();

    Value::List(fanned)
}
