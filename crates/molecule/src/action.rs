mod delecs;
mod delete;
mod edit;
mod insert;
mod stmt;
pub use stmt::Stmt;
mod topics;
pub use topics::{JoinKind, Joint, Topics};
mod update;
mod upsert;

use crate::{Column, Cx, Options, Record, Result, Table, Value};

use molecule_sql::stmt::Filter;
use serde::{Deserialize, Serialize};

/// A named operation an atom exposes, with the cascades around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,

    #[serde(flatten)]
    pub kind: ActionKind,

    /// Restricts the columns the action reads or writes, by name or label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked: Option<Vec<String>>,

    /// Connections run before the action, feeding its arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prepares: Vec<crate::Connection>,

    /// Connections run for every result row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nextpages: Vec<crate::Connection>,

    /// When this action runs as a prepare and returns several rows, whether
    /// the caller keeps its arguments and moves on to its next prepare,
    /// instead of fanning out over the rows. Defaults to `true` for
    /// delete-cascade preparation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fanout_continues: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActionKind {
    Insert,
    Update,
    Upsert,
    Delete,
    /// Reads back key and foreign key columns ahead of a cascading delete
    Delecs,
    /// Reads one row by primary key
    Edit,
    /// Lists rows with optional joins, ordering and paging
    Topics(Topics),
    /// Runs a raw statement
    Stmt(Stmt),
}

/// Everything an action needs while it runs.
pub(crate) struct Run<'a> {
    pub(crate) cx: &'a Cx<'a>,
    pub(crate) table: &'a Table,
    pub(crate) action: &'a Action,
    pub(crate) options: &'a Options,
}

impl Action {
    pub fn new(name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            picked: None,
            prepares: vec![],
            nextpages: vec![],
            fanout_continues: None,
        }
    }

    pub fn insert() -> Self {
        Self::new("insert", ActionKind::Insert)
    }

    pub fn update() -> Self {
        Self::new("update", ActionKind::Update)
    }

    pub fn upsert() -> Self {
        Self::new("insupd", ActionKind::Upsert)
    }

    pub fn delete() -> Self {
        Self::new("delete", ActionKind::Delete)
    }

    pub fn delecs() -> Self {
        Self::new("delecs", ActionKind::Delecs)
    }

    pub fn edit() -> Self {
        Self::new("edit", ActionKind::Edit)
    }

    pub fn topics() -> Self {
        Self::new("topics", ActionKind::Topics(Topics::default()))
    }

    pub fn picked<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.picked = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn prepare(mut self, connection: crate::Connection) -> Self {
        self.prepares.push(connection);
        self
    }

    pub fn nextpage(mut self, connection: crate::Connection) -> Self {
        self.nextpages.push(connection);
        self
    }

    pub fn with_fanout_continues(mut self, fanout_continues: bool) -> Self {
        self.fanout_continues = Some(fanout_continues);
        self
    }

    /// Actions that write to storage. They do nothing without input.
    pub fn is_mutating(&self) -> bool {
        match &self.kind {
            ActionKind::Insert
            | ActionKind::Update
            | ActionKind::Upsert
            | ActionKind::Delete
            | ActionKind::Delecs => true,
            ActionKind::Edit | ActionKind::Topics(_) => false,
            ActionKind::Stmt(stmt) => stmt.columns.is_empty(),
        }
    }

    pub fn fanout_continues(&self) -> bool {
        self.fanout_continues
            .unwrap_or(matches!(self.kind, ActionKind::Delecs))
    }

    /// Whether a nextpage into this action only runs when the caller nested
    /// input for it. Deletes are driven by the parent row alone.
    pub(crate) fn needs_nested_input(&self) -> bool {
        self.is_mutating() && !matches!(self.kind, ActionKind::Delete | ActionKind::Delecs)
    }

    pub(crate) fn is_delete_prep(&self) -> bool {
        matches!(self.kind, ActionKind::Delecs)
    }

    /// Fields the action writes back into the caller's arguments.
    pub(crate) fn out_fields<'a>(&self, options: &'a Options) -> Vec<&'a str> {
        match &self.kind {
            ActionKind::Topics(_) => vec![&options.fields.totalno, &options.fields.maxpageno],
            _ => vec![],
        }
    }

    /// Runs the action against its table.
    pub(crate) async fn run(
        &self,
        cx: &Cx<'_>,
        table: &Table,
        options: &Options,
        args: &mut Value,
        extra: Option<&Record>,
    ) -> Result<Vec<Record>> {
        cx.check()?;

        let run = Run {
            cx,
            table,
            action: self,
            options,
        };

        match &self.kind {
            ActionKind::Edit => run.edit(args.records().next(), extra).await,
            ActionKind::Topics(topics) => run.topics(topics, args, extra).await,
            ActionKind::Stmt(stmt) => run.stmt(stmt, args, extra).await,
            _ => {
                let mut ret = vec![];

                for record in args.records() {
                    ret.extend(run.write(record, extra).await?);
                }

                Ok(ret)
            }
        }
    }
}

impl<'a> Run<'a> {
    /// Runs a mutating action for one argument record.
    async fn write(&self, record: &Record, extra: Option<&Record>) -> Result<Vec<Record>> {
        match &self.action.kind {
            ActionKind::Insert => self.insert(record).await,
            ActionKind::Update => self.update(record, extra).await,
            ActionKind::Upsert => self.upsert(record, extra).await,
            ActionKind::Delete => self.delete(record, extra).await,
            ActionKind::Delecs => self.delecs(record, extra).await,
            ActionKind::Edit | ActionKind::Topics(_) | ActionKind::Stmt(_) => {
                unreachable!("read actions run once per call")
            }
        }
    }

    fn is_picked(&self, column: &Column) -> bool {
        match &self.action.picked {
            Some(picked) => picked
                .iter()
                .any(|name| *name == column.name || name == column.label()),
            None => true,
        }
    }

    /// Columns read by the action, in table order.
    fn read_columns(&self) -> Vec<&'a Column> {
        let picked: Vec<_> = self
            .table
            .columns
            .iter()
            .filter(|column| self.is_picked(column))
            .collect();

        if picked.is_empty() {
            self.table.columns.iter().collect()
        } else {
            picked
        }
    }

    /// Scalar values of `record` for writable columns, keyed by column.
    ///
    /// Nested records and lists are cascade input for other atoms and never
    /// written. A blank auto column is left to the database.
    fn writable(&self, record: &Record) -> Vec<(&'a Column, Value)> {
        let mut ret = vec![];

        for column in &self.table.columns {
            if !self.is_picked(column) {
                continue;
            }

            let Some(value) = record
                .get(&column.name)
                .or_else(|| record.get(column.label()))
            else {
                continue;
            };

            if value.is_record() || value.is_list() {
                continue;
            }

            if column.auto && value.is_blank() {
                continue;
            }

            ret.push((column, value.clone()));
        }

        ret
    }

    /// The primary key from the arguments, falling back to the constraints.
    fn primary_key(&self, record: &Record, extra: Option<&Record>) -> Option<Record> {
        self.table
            .primary_key_of(record)
            .or_else(|| extra.and_then(|extra| self.table.primary_key_of(extra)))
    }

    /// Adds a condition for every constraint naming a column of the table.
    /// Key conditions already in `filter` are not repeated.
    fn constrain(&self, filter: &mut Filter, extra: Option<&Record>) {
        let Some(extra) = extra else { return };

        for (field, value) in extra {
            let Some(column) = self.table.resolve_column(field) else {
                tracing::trace!(table = %self.table.name, field = %field, "constraint names no column");
                continue;
            };

            if value.is_record() || filter.contains(&column.name) {
                continue;
            }

            filter.push(column.name.as_str(), value.clone());
        }
    }

    fn key_filter(key: &Record) -> Filter {
        let mut filter = Filter::new();
        for (column, value) in key {
            filter.push(column.as_str(), value.clone());
        }
        filter
    }

    /// Relabels a key record keyed by column name.
    fn labeled(&self, key: &Record) -> Record {
        key.iter()
            .map(|(name, value)| {
                let label = self
                    .table
                    .get_column(name)
                    .map_or(name.as_str(), Column::label);
                (label.to_string(), value.clone())
            })
            .collect()
    }

    /// Turns a result row into a record keyed by column label.
    fn decode(columns: &[&Column], values: Vec<Value>) -> Record {
        columns
            .iter()
            .zip(values)
            .map(|(column, value)| (column.label().to_string(), value))
            .collect()
    }
}
