use super::{Filter, Statement};

#[derive(Debug, Clone)]
pub struct Select {
    pub from: TableRef,

    pub joins: Vec<Join>,

    /// Columns to return. Ignored when `count` is set.
    pub columns: Vec<ColumnRef>,

    pub filter: Filter,

    /// Raw `ORDER BY` clause body. The caller is responsible for vetting it.
    pub order_by: Option<String>,

    pub limit: Option<Limit>,

    /// Return `COUNT(*)` instead of rows.
    pub count: bool,
}

#[derive(Debug, Clone)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    pub constraint: JoinConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone)]
pub enum JoinConstraint {
    Using(Vec<String>),

    /// Raw join condition
    On(String),
}

/// A column, optionally qualified by a table name or alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub count: u64,
    pub offset: u64,
}

impl Statement {
    pub fn select(from: TableRef, columns: Vec<ColumnRef>, filter: Filter) -> Self {
        Select {
            from,
            joins: vec![],
            columns,
            filter,
            order_by: None,
            limit: None,
            count: false,
        }
        .into()
    }
}

impl Select {
    /// Turns the select into the matching `COUNT(*)` query: same source and
    /// filter, no ordering or paging.
    pub fn to_count(&self) -> Select {
        Select {
            from: self.from.clone(),
            joins: self.joins.clone(),
            columns: vec![],
            filter: self.filter.clone(),
            order_by: None,
            limit: None,
            count: true,
        }
    }
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }

    /// The name columns of this table should be qualified with.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(value: &str) -> Self {
        ColumnRef::new(value)
    }
}

impl From<String> for ColumnRef {
    fn from(value: String) -> Self {
        ColumnRef::new(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
