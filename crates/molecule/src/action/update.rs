use super::Run;
use crate::{Error, Record, Result};

use molecule_sql::Statement;

impl Run<'_> {
    /// Updates the row matched by primary key. Returns the key and the
    /// fields written.
    pub(super) async fn update(&self, record: &Record, extra: Option<&Record>) -> Result<Vec<Record>> {
        let key = self
            .primary_key(record, extra)
            .ok_or_else(|| Error::missing_primary_key(&self.table.name))?;

        self.update_by_key(record, &key, extra).await
    }

    pub(super) async fn update_by_key(
        &self,
        record: &Record,
        key: &Record,
        extra: Option<&Record>,
    ) -> Result<Vec<Record>> {
        let assignments: Vec<_> = self
            .writable(record)
            .into_iter()
            .filter(|(column, _)| !self.table.is_primary_key(&column.name))
            .collect();

        if assignments.is_empty() {
            return Err(Error::empty_input(&self.table.name));
        }

        let mut ret = self.labeled(key);
        for (column, value) in &assignments {
            ret.insert(column.label(), value.clone());
        }

        let mut filter = Self::key_filter(key);
        self.constrain(&mut filter, extra);

        let stmt = Statement::update(
            &self.table.name,
            assignments
                .into_iter()
                .map(|(column, value)| (column.name.clone(), value))
                .collect(),
            filter,
        );

        let execution = self.cx.execute(&stmt).await?;
        tracing::debug!(
            table = %self.table.name,
            rows = execution.rows_affected,
            "updated rows"
        );

        Ok(vec![ret])
    }
}
