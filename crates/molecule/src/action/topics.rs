use super::Run;
use crate::{Column, Record, Result, Value};

use molecule_sql::stmt::{self, ColumnRef, Filter, Join, JoinConstraint, Limit, Select, TableRef};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Settings of a list action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topics {
    /// Tables to read from. When the first entry names the atom's own table
    /// it only sets that table's alias and default sort; every other entry
    /// is joined.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joints: Vec<Joint>,

    /// Overrides the engine-wide total counting behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_force: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Joint {
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: JoinKind,

    /// Columns shared with the tables before it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub using: Vec<String>,

    /// Raw join condition, used when `using` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,

    /// Default sort clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortby: Option<String>,

    /// Columns of this table to return
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
}

impl Joint {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            kind: JoinKind::Inner,
            using: vec![],
            on: None,
            sortby: None,
            columns: vec![],
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn left(mut self) -> Self {
        self.kind = JoinKind::Left;
        self
    }

    pub fn using<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.using = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn on(mut self, condition: impl Into<String>) -> Self {
        self.on = Some(condition.into());
        self
    }

    pub fn sortby(mut self, sortby: impl Into<String>) -> Self {
        self.sortby = Some(sortby.into());
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    fn table_ref(&self) -> TableRef {
        TableRef::aliased(&self.table, self.alias.clone())
    }
}

impl Topics {
    pub fn joint(mut self, joint: Joint) -> Self {
        self.joints.push(joint);
        self
    }

    pub fn total_force(mut self, total_force: i64) -> Self {
        self.total_force = Some(total_force);
        self
    }
}

/// Last page number for `total` rows shown `rowcount` at a time.
pub(crate) fn max_page(total: i64, rowcount: i64) -> i64 {
    (total - 1) / rowcount + 1
}

/// Rejects clauses that could carry injected SQL.
fn is_safe_clause(clause: &str) -> bool {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r#"['";]"#).expect("valid regex"));
    !unsafe_chars.is_match(clause)
}

/// The columns a select returns, with their result labels.
struct Source<'a> {
    select: Select,
    columns: Vec<&'a Column>,
}

impl<'a> Run<'a> {
    /// Lists rows, honoring sort and paging fields of the arguments.
    ///
    /// Paging totals are written back into the first argument record.
    pub(super) async fn topics(
        &self,
        topics: &'a Topics,
        args: &mut Value,
        extra: Option<&Record>,
    ) -> Result<Vec<Record>> {
        if !args.is_record() {
            *args = match args.take() {
                Value::List(items) => items
                    .into_iter()
                    .find(Value::is_record)
                    .unwrap_or_else(|| Value::Record(Record::new())),
                _ => Value::Record(Record::new()),
            };
        }

        let Some(args) = args.as_record_mut() else {
            return Ok(vec![]);
        };

        let Source {
            mut select,
            columns,
        } = self.source(topics, extra);

        let fields = &self.options.fields;
        let order_by = self.order_by(topics, args, &select.from);

        let rowcount = args
            .present(&fields.rowcount)
            .and_then(Value::as_i64)
            .filter(|rowcount| *rowcount > 0);

        let mut limit = None;
        if let Some(rowcount) = rowcount {
            let pageno = args
                .present(&fields.pageno)
                .and_then(Value::as_i64)
                .unwrap_or(1)
                .max(1);

            if args.present(&fields.pageno).is_none() {
                self.page_totals(topics, &select, rowcount, args).await?;
            }

            // Both factors are non-negative, so the product saturates at
            // `i64::MAX` rather than wrapping.
            limit = Some(Limit {
                count: rowcount as u64,
                offset: (pageno - 1).saturating_mul(rowcount) as u64,
            });
        }

        if is_safe_clause(&order_by) {
            select.order_by = (!order_by.is_empty()).then_some(order_by);
            select.limit = limit;
        } else {
            tracing::warn!(
                table = %self.table.name,
                clause = %order_by,
                "dropping unsafe ORDER BY clause"
            );
        }

        let shape: Vec<_> = columns.iter().map(|column| column.ty).collect();
        let rows = self.cx.query(&select.into(), &shape).await?;

        Ok(rows
            .into_iter()
            .map(|values| Self::decode(&columns, values))
            .collect())
    }

    fn source(&self, topics: &'a Topics, extra: Option<&Record>) -> Source<'a> {
        let mut joints = topics.joints.iter().peekable();

        let main = joints.next_if(|joint| joint.table == self.table.name);
        let from = match main {
            Some(joint) => joint.table_ref(),
            None => TableRef::new(&self.table.name),
        };

        let joined: Vec<&Joint> = joints.collect();
        let qualify = !joined.is_empty();

        let column_ref = |table: &TableRef, name: &str| {
            if qualify {
                ColumnRef::qualified(table.qualifier(), name)
            } else {
                ColumnRef::new(name)
            }
        };

        let mut columns = self.read_columns();
        let mut refs: Vec<_> = columns
            .iter()
            .map(|column| column_ref(&from, &column.name))
            .collect();

        let mut joins = vec![];
        for joint in joined.iter().copied() {
            let table = joint.table_ref();

            for column in &joint.columns {
                refs.push(column_ref(&table, &column.name));
                columns.push(column);
            }

            let constraint = if joint.using.is_empty() {
                JoinConstraint::On(joint.on.clone().unwrap_or_default())
            } else {
                JoinConstraint::Using(joint.using.clone())
            };

            joins.push(Join {
                kind: match joint.kind {
                    JoinKind::Inner => stmt::JoinKind::Inner,
                    JoinKind::Left => stmt::JoinKind::Left,
                },
                table,
                constraint,
            });
        }

        let mut filter = Filter::new();
        for (field, value) in extra.into_iter().flatten() {
            if value.is_record() {
                continue;
            }

            if let Some(column) = self.table.resolve_column(field) {
                filter.push(column_ref(&from, &column.name), value.clone());
                continue;
            }

            let joined_column = joined.iter().find_map(|joint| {
                joint
                    .columns
                    .iter()
                    .find(|column| column.name == *field || column.label() == field)
                    .map(|column| (joint.table_ref(), column))
            });

            match joined_column {
                Some((table, column)) => {
                    filter.push(column_ref(&table, &column.name), value.clone());
                }
                None => {
                    tracing::trace!(table = %self.table.name, field = %field, "constraint names no column")
                }
            }
        }

        Source {
            select: Select {
                from,
                joins,
                columns: refs,
                filter,
                order_by: None,
                limit: None,
                count: false,
            },
            columns,
        }
    }

    /// Sort field from the arguments, else the main table's declared sort,
    /// else the primary key.
    fn order_by(&self, topics: &Topics, args: &Record, from: &TableRef) -> String {
        let fields = &self.options.fields;

        let mut clause = match args.present(&fields.sortby) {
            Some(sortby) => sortby.to_string(),
            None => match topics.joints.first().and_then(|joint| joint.sortby.as_ref()) {
                Some(sortby) => sortby.clone(),
                None => {
                    let qualify = topics.joints.len() > 1
                        || topics
                            .joints
                            .first()
                            .is_some_and(|joint| joint.table != self.table.name);

                    self.table
                        .pks
                        .iter()
                        .map(|pk| {
                            if qualify {
                                format!("{}.{pk}", from.qualifier())
                            } else {
                                pk.clone()
                            }
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            },
        };

        if !clause.is_empty()
            && args
                .present(&fields.sortreverse)
                .is_some_and(Value::is_truthy)
        {
            clause.push_str(" DESC");
        }

        clause
    }

    /// Resolves the total row count and last page number and stores both in
    /// the arguments.
    async fn page_totals(
        &self,
        topics: &Topics,
        select: &Select,
        rowcount: i64,
        args: &mut Record,
    ) -> Result<()> {
        let fields = &self.options.fields;
        let total_force = topics.total_force.unwrap_or(self.options.total_force);

        let total = match total_force {
            0 => return Ok(()),
            force if force < -1 => force.abs(),
            _ => match args.present(&fields.totalno).and_then(Value::as_i64) {
                Some(total) => total,
                None => {
                    let rows = self
                        .cx
                        .query(&select.to_count().into(), &[crate::Type::I64])
                        .await?;

                    rows.first()
                        .and_then(|row| row.first())
                        .and_then(Value::as_i64)
                        .unwrap_or_default()
                }
            },
        };

        args.insert(fields.totalno.as_str(), total);
        args.insert(fields.maxpageno.as_str(), max_page(total, rowcount));
        Ok(())
    }
}
