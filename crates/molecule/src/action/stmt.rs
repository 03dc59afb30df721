use super::Run;
use crate::{Column, Record, Result, Value};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw SQL statement with named positional parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stmt {
    /// Statement text, using the executor's placeholder syntax
    pub statement: String,

    /// Argument or constraint field bound to each placeholder, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,

    /// Columns the statement returns. Without any, the statement is
    /// executed and reports the rows it affected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,

    /// Alternative statements, chosen when their key is present in the
    /// arguments
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub others: IndexMap<String, Stmt>,
}

impl Stmt {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            ..Self::default()
        }
    }

    pub fn param(mut self, field: impl Into<String>) -> Self {
        self.params.push(field.into());
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn other(mut self, key: impl Into<String>, stmt: Stmt) -> Self {
        self.others.insert(key.into(), stmt);
        self
    }

    /// The statement to run for `args`.
    fn select(&self, args: &Record) -> &Stmt {
        self.others
            .iter()
            .find(|(key, _)| args.present(key).is_some())
            .map_or(self, |(_, stmt)| stmt)
    }
}

impl Run<'_> {
    /// Runs a raw statement once per argument record.
    pub(super) async fn stmt(&self, stmt: &Stmt, args: &Value, extra: Option<&Record>) -> Result<Vec<Record>> {
        let empty = Record::new();
        let mut records: Vec<&Record> = args.records().collect();
        if records.is_empty() {
            records.push(&empty);
        }

        let mut ret = vec![];

        for record in records {
            let stmt = stmt.select(record);

            let params: Vec<Value> = stmt
                .params
                .iter()
                .map(|field| {
                    record
                        .get(field)
                        .or_else(|| extra.and_then(|extra| extra.get(field)))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();

            if stmt.columns.is_empty() {
                let execution = self.cx.execute_sql(&stmt.statement, &params).await?;

                let mut row = Record::new();
                row.insert("rows_affected", execution.rows_affected as i64);
                if let Some(id) = execution.last_insert_id {
                    row.insert("last_insert_id", id);
                }
                ret.push(row);
            } else {
                let columns: Vec<_> = stmt.columns.iter().collect();
                let shape: Vec<_> = columns.iter().map(|column| column.ty).collect();

                let rows = self.cx.query_sql(&stmt.statement, &params, &shape).await?;
                ret.extend(rows.into_iter().map(|values| Self::decode(&columns, values)));
            }
        }

        Ok(ret)
    }
}
