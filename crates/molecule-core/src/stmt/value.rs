use super::Record;

use serde::Serialize;

/// A dynamically typed value flowing through a cascade.
///
/// Arguments, constraints and results are all built from this type: a scalar,
/// a nested record, or a list (normally of records).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Null value
    #[default]
    Null,

    /// A nested record
    Record(Record),

    /// A list of values, normally records
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// True for values that carry nothing: null, the empty string, an empty
    /// record or an empty list.
    ///
    /// A blank value never counts as "present" when resolving keys or
    /// deciding whether a cascade step has input.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(v) => v.is_empty(),
            Self::Record(v) => v.is_empty(),
            Self::List(v) => v.iter().all(Value::is_blank),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Integer view of the value. Strings holding an integer parse, since
    /// pagination fields usually arrive as request text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            Self::F64(v) if v.fract() == 0.0 => Some(*v as i64),
            Self::Bool(v) => Some(*v as i64),
            Self::String(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    /// Loose truthiness used for flag fields such as `sortreverse`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            Self::I64(v) => *v != 0,
            Self::F64(v) => *v != 0.0,
            Self::String(v) => !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"),
            Self::Null => false,
            _ => !self.is_blank(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Iterates the records held by this value: the record itself, or every
    /// record element of a list. Other values yield nothing.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        let items: &[Value] = match self {
            Self::List(items) => items,
            _ => std::slice::from_ref(self),
        };

        items.iter().filter_map(Value::as_record)
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> + '_ {
        let items: &mut [Value] = match self {
            Self::List(items) => items,
            _ => std::slice::from_mut(self),
        };

        items.iter_mut().filter_map(Value::as_record_mut)
    }

    /// Consumes the value, returning its records.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Record(record) => vec![record],
            Self::List(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Self::Record(record) => Some(record),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Builds a value from records: a single record stays a record, several
    /// become a list, none becomes null.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        match records.len() {
            0 => Self::Null,
            1 => Self::Record(records.remove(0)),
            _ => Self::List(records.into_iter().map(Self::Record).collect()),
        }
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl AsRef<Self> for Value {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src as i64)
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::I64(src as i64)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Vec<Record>> for Value {
    fn from(value: Vec<Record>) -> Self {
        Self::List(value.into_iter().map(Self::Record).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::Null => f.write_str("null"),
            Self::Record(_) | Self::List(_) => {
                let json = serde_json::to_string(self).map_err(|_| core::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
