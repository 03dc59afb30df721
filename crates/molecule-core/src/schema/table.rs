use super::{Column, ForeignKey};
use crate::stmt::{Record, Value};

use serde::{Deserialize, Serialize};

/// Static metadata for one database table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,

    /// Names of the primary key columns
    #[serde(default)]
    pub pks: Vec<String>,

    /// Column whose value the database generates on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_auto: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fks: Vec<ForeignKey>,

    /// Column names forming the uniqueness group used by upserts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uniques: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            pks: vec![],
            id_auto: None,
            fks: vec![],
            uniques: vec![],
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pks = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn id_auto(mut self, column: impl Into<String>) -> Self {
        self.id_auto = Some(column.into());
        self
    }

    pub fn unique<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uniques = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.fks.push(fk);
        self
    }

    /// Finds a column by its database name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Finds a column by database name, then by label.
    pub fn resolve_column(&self, name: &str) -> Option<&Column> {
        self.get_column(name)
            .or_else(|| self.columns.iter().find(|column| column.label() == name))
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.pks.iter().filter_map(|pk| self.get_column(pk))
    }

    pub fn is_primary_key(&self, name: &str) -> bool {
        self.pks.iter().any(|pk| pk == name)
    }

    pub fn auto_column(&self) -> Option<&Column> {
        self.id_auto.as_deref().and_then(|name| self.get_column(name))
    }

    /// A table is recursive when one of its primary key columns is flagged
    /// as the self-reference anchor.
    pub fn is_recursive(&self) -> bool {
        self.primary_key_columns().any(|column| column.recursive)
    }

    /// The first non-key column flagged as part of the self-reference: the
    /// child-to-parent pointer.
    pub fn recursive_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.recursive && !self.is_primary_key(&column.name))
    }

    /// Looks up the value for `column` in `record`, by column name first
    /// and label second. Blank values count as absent.
    pub fn value_of<'a>(&self, record: &'a Record, column: &Column) -> Option<&'a Value> {
        record
            .present(&column.name)
            .or_else(|| record.present(column.label()))
    }

    /// The primary key values held by `record`, keyed by column name, or
    /// `None` if any key column is missing.
    pub fn primary_key_of(&self, record: &Record) -> Option<Record> {
        if self.pks.is_empty() {
            return None;
        }

        let mut key = Record::with_capacity(self.pks.len());

        for column in self.primary_key_columns() {
            key.insert(column.name.clone(), self.value_of(record, column)?.clone());
        }

        (key.len() == self.pks.len()).then_some(key)
    }

    /// Fills in every column whose label is present in `record` but whose
    /// column name is not, so callers may use either spelling.
    pub fn reconcile(&self, record: &mut Record) {
        for column in &self.columns {
            if record.contains_key(&column.name) {
                continue;
            }

            if let Some(value) = record.get(column.label()).cloned() {
                record.insert(column.name.clone(), value);
            }
        }
    }
}
