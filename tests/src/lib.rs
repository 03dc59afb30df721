#[macro_use]
mod macros;

mod exec_log;
pub use exec_log::ExecLog;

pub mod fixtures;

mod logging_executor;
pub use logging_executor::{ExecutorOp, LoggingExecutor};

mod molecule_test;
pub use molecule_test::MoleculeTest;

use molecule::{Cx, Molecule, Table};
use std::sync::Arc;

pub use serde_json;
pub use std_util::*;

/// A fresh in-memory database, with every statement logged.
#[derive(Debug, Clone)]
pub struct TestDb {
    executor: Arc<LoggingExecutor>,
}

impl TestDb {
    pub fn new() -> Self {
        let sqlite = molecule_driver_sqlite::Sqlite::in_memory().unwrap();

        Self {
            executor: Arc::new(LoggingExecutor::new(Box::new(sqlite))),
        }
    }

    /// Creates the tables of every atom of `molecule`, then clears the log.
    pub async fn push(&self, molecule: &Molecule) {
        let tables: Vec<Table> = molecule
            .atoms()
            .iter()
            .map(|atom| atom.table.clone())
            .collect();

        molecule::Executor::push_schema(&*self.executor, &tables)
            .await
            .unwrap();

        self.log().clear();
    }

    pub fn cx(&self) -> Cx<'_> {
        Cx::new(&*self.executor)
    }

    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.executor.ops_log_handle())
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}
