use molecule::{Capability, Execution, Executor, Table, Type, Value};
use molecule_core::{async_trait, Result};
use std::sync::{Arc, Mutex};

/// An executor wrapper that logs every statement for assertions.
#[derive(Debug)]
pub struct LoggingExecutor {
    inner: Box<dyn Executor>,

    /// Log of all statements run through this executor
    ops_log: Arc<Mutex<Vec<ExecutorOp>>>,
}

#[derive(Debug, Clone)]
pub struct ExecutorOp {
    pub sql: String,
    pub params: Vec<Value>,
}

impl LoggingExecutor {
    pub fn new(executor: Box<dyn Executor>) -> Self {
        Self {
            inner: executor,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<ExecutorOp>>> {
        self.ops_log.clone()
    }

    fn record(&self, sql: &str, params: &[Value]) {
        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(ExecutorOp {
                sql: sql.to_string(),
                params: params.to_vec(),
            });
    }
}

#[async_trait]
impl Executor for LoggingExecutor {
    fn capability(&self) -> &Capability {
        self.inner.capability()
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<Execution> {
        self.record(sql, params);
        self.inner.execute(sql, params).await
    }

    async fn query(&self, sql: &str, params: &[Value], shape: &[Type]) -> Result<Vec<Vec<Value>>> {
        self.record(sql, params);
        self.inner.query(sql, params, shape).await
    }

    async fn push_schema(&self, tables: &[Table]) -> Result<()> {
        self.inner.push_schema(tables).await
    }
}
