use super::Run;
use crate::{Error, Record, Result};

use molecule_sql::{
    stmt::{ColumnRef, TableRef},
    Statement,
};

impl Run<'_> {
    /// Reads one row by primary key.
    pub(super) async fn edit(&self, record: Option<&Record>, extra: Option<&Record>) -> Result<Vec<Record>> {
        let empty = Record::new();
        let key = self
            .primary_key(record.unwrap_or(&empty), extra)
            .ok_or_else(|| Error::missing_primary_key(&self.table.name))?;

        let mut filter = Self::key_filter(&key);
        self.constrain(&mut filter, extra);

        let columns = self.read_columns();
        let stmt = Statement::select(
            TableRef::new(&self.table.name),
            columns.iter().map(|column| ColumnRef::new(&column.name)).collect(),
            filter,
        );

        let shape: Vec<_> = columns.iter().map(|column| column.ty).collect();
        let rows = self.cx.query(&stmt, &shape).await?;

        Ok(rows
            .into_iter()
            .map(|values| Self::decode(&columns, values))
            .collect())
    }
}
