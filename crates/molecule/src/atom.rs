use crate::{Action, Error, Result, Table};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A table together with the actions it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub table: Table,

    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Atom {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            actions: vec![],
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn get_action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }

    pub(crate) fn verify(&self) -> Result<()> {
        self.table.verify()?;

        let mut names = HashSet::new();
        for action in &self.actions {
            if !names.insert(action.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "atom `{}` declares action `{}` twice",
                    self.name(),
                    action.name
                )));
            }
        }

        Ok(())
    }
}
