use super::Table;
use crate::{Error, Result};

use std::collections::HashSet;

impl Table {
    /// Checks the descriptor's invariants.
    pub fn verify(&self) -> Result<()> {
        let mut names = HashSet::new();

        for column in &self.columns {
            if !names.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "table `{}` declares column `{}` twice",
                    self.name, column.name
                )));
            }
        }

        if let Some(id_auto) = &self.id_auto {
            match self.get_column(id_auto) {
                Some(column) if column.auto => {}
                Some(_) => {
                    return Err(Error::invalid_schema(format!(
                        "auto id column `{id_auto}` of table `{}` is not flagged auto",
                        self.name
                    )))
                }
                None => return Err(self.missing(id_auto, "auto id")),
            }
        }

        for pk in &self.pks {
            if self.get_column(pk).is_none() {
                return Err(self.missing(pk, "primary key"));
            }
        }

        for unique in &self.uniques {
            if self.get_column(unique).is_none() {
                return Err(self.missing(unique, "unique"));
            }
        }

        for fk in &self.fks {
            if self.get_column(&fk.column).is_none() {
                return Err(self.missing(&fk.column, "foreign key"));
            }
        }

        Ok(())
    }

    fn missing(&self, column: &str, role: &str) -> Error {
        Error::unknown_column(column).context(Error::invalid_schema(format!(
            "{role} column of table `{}`",
            self.name
        )))
    }
}
