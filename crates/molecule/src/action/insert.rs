use super::Run;
use crate::{Error, Record, Result, Value};

use molecule_sql::{stmt::Insert, Statement};

impl Run<'_> {
    /// Inserts one row and returns the fields written, plus the generated id.
    pub(super) async fn insert(&self, record: &Record) -> Result<Vec<Record>> {
        let fields = self.writable(record);
        let auto = self.table.auto_column();

        if fields.is_empty() && auto.is_none() {
            return Err(Error::empty_input(&self.table.name));
        }

        let mut ret = Record::with_capacity(fields.len() + 1);
        for (column, value) in &fields {
            ret.insert(column.label(), value.clone());
        }

        let (columns, values) = fields
            .into_iter()
            .map(|(column, value)| (column.name.clone(), value))
            .unzip();

        let insert = Insert {
            table: self.table.name.clone(),
            columns,
            values,
            returning: None,
        };

        let Some(auto) = auto.filter(|auto| !ret.contains_key(auto.label())) else {
            self.cx.execute(&Statement::from(insert)).await?;
            return Ok(vec![ret]);
        };

        let id = if self.cx.executor().capability().insert_returning {
            let stmt = Statement::from(insert.returning(&auto.name));

            let rows = self.cx.query(&stmt, &[auto.ty]).await?;
            rows.into_iter()
                .next()
                .and_then(|row| row.into_iter().next())
                .unwrap_or_default()
        } else {
            let execution = self.cx.execute(&Statement::from(insert)).await?;
            Value::from(execution.last_insert_id)
        };

        tracing::debug!(table = %self.table.name, %id, "inserted row");
        ret.insert(auto.label(), id);

        Ok(vec![ret])
    }
}
