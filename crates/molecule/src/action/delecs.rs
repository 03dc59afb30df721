use super::Run;
use crate::{Error, Record, Result};

use indexmap::IndexSet;
use molecule_sql::{
    stmt::{ColumnRef, TableRef},
    Statement,
};

impl Run<'_> {
    /// Reads back the key and foreign key columns of the rows about to be
    /// deleted, so their dependants can be deleted first.
    ///
    /// A table without foreign keys has nothing to read back: the input
    /// passes through.
    pub(super) async fn delecs(&self, record: &Record, extra: Option<&Record>) -> Result<Vec<Record>> {
        let table = self.table;

        if table.fks.is_empty() {
            return Ok(vec![record.clone()]);
        }

        let names: IndexSet<&str> = table
            .pks
            .iter()
            .map(String::as_str)
            .chain(table.fks.iter().map(|fk| fk.column.as_str()))
            .collect();

        let columns: Vec<_> = names
            .iter()
            .filter_map(|name| table.get_column(name))
            .collect();

        if columns.is_empty() {
            return Err(Error::missing_foreign_or_primary_keys(&table.name));
        }

        let filter = self.delete_filter(record, extra);
        if filter.is_empty() {
            return Err(Error::missing_primary_key(&table.name));
        }

        let stmt = Statement::select(
            TableRef::new(&table.name),
            columns.iter().map(|column| ColumnRef::new(&column.name)).collect(),
            filter,
        );

        let shape: Vec<_> = columns.iter().map(|column| column.ty).collect();
        let rows = self.cx.query(&stmt, &shape).await?;

        Ok(rows
            .into_iter()
            .map(|values| {
                let mut row = Self::decode(&columns, values);
                row.retain(|_, value| !value.is_null());
                row
            })
            .collect())
    }
}
