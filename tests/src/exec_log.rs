use crate::logging_executor::ExecutorOp;
use std::sync::{Arc, Mutex};

/// A wrapper around the statement log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<ExecutorOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<ExecutorOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Count statements starting with the given SQL keyword
    pub fn count(&self, keyword: &str) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.sql.starts_with(keyword))
            .count()
    }

    pub fn has(&self, keyword: &str) -> bool {
        self.count(keyword) > 0
    }

    /// The SQL of every logged statement, in order
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.sql.clone())
            .collect()
    }

    pub fn last(&self) -> Option<ExecutorOp> {
        self.ops.lock().unwrap().last().cloned()
    }
}
