use super::Run;
use crate::{Error, Record, Result};

use molecule_sql::{stmt::Filter, Statement};

impl Run<'_> {
    /// Deletes the rows matched by primary key and constraints. Returns no
    /// rows.
    pub(super) async fn delete(&self, record: &Record, extra: Option<&Record>) -> Result<Vec<Record>> {
        let filter = self.delete_filter(record, extra);

        if filter.is_empty() {
            return Err(Error::whole_table_delete_refused(&self.table.name));
        }

        let execution = self
            .cx
            .execute(&Statement::delete(&self.table.name, filter))
            .await?;

        tracing::debug!(
            table = %self.table.name,
            rows = execution.rows_affected,
            "deleted rows"
        );

        Ok(vec![])
    }

    /// Conditions selecting the rows a delete, or its cascade preparation,
    /// targets.
    pub(super) fn delete_filter(&self, record: &Record, extra: Option<&Record>) -> Filter {
        let mut filter = match self.primary_key(record, extra) {
            Some(key) => Self::key_filter(&key),
            None => Filter::new(),
        };

        self.constrain(&mut filter, extra);
        filter
    }
}
