use super::Run;
use crate::{Error, Record, Result};

use molecule_sql::{
    stmt::{ColumnRef, Filter, TableRef},
    Statement,
};

impl Run<'_> {
    /// Inserts the row, or updates it when a row with the same unique key
    /// values already exists.
    pub(super) async fn upsert(&self, record: &Record, extra: Option<&Record>) -> Result<Vec<Record>> {
        let table = self.table;

        if table.uniques.is_empty() {
            return Err(Error::no_unique_key_declared(&table.name));
        }

        let mut filter = Filter::new();
        let mut unique = Record::with_capacity(table.uniques.len());

        for name in &table.uniques {
            let value = table
                .get_column(name)
                .and_then(|column| table.value_of(record, column))
                .ok_or_else(|| Error::missing_unique_key(&table.name))?;

            filter.push(name.as_str(), value.clone());
            unique.insert(name.clone(), value.clone());
        }

        let key_columns: Vec<_> = if table.pks.is_empty() {
            table.uniques.clone()
        } else {
            table.pks.clone()
        };

        let shape: Vec<_> = key_columns
            .iter()
            .filter_map(|name| table.get_column(name))
            .map(|column| column.ty)
            .collect();

        let stmt = Statement::select(
            TableRef::new(&table.name),
            key_columns.iter().map(ColumnRef::new).collect(),
            filter,
        );

        let mut rows = self.cx.query(&stmt, &shape).await?;

        match rows.len() {
            0 => self.insert(record).await,
            1 => {
                let key: Record = key_columns.iter().cloned().zip(rows.remove(0)).collect();

                if self.has_assignments(record) {
                    self.update_by_key(record, &key, extra).await
                } else {
                    let mut ret = self.labeled(&key);
                    ret.fill_from(&self.labeled(&unique));
                    Ok(vec![ret])
                }
            }
            _ => Err(Error::ambiguous_unique_match(&table.name)),
        }
    }

    fn has_assignments(&self, record: &Record) -> bool {
        self.writable(record)
            .iter()
            .any(|(column, _)| !self.table.is_primary_key(&column.name))
    }
}
