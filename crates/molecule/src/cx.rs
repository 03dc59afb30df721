use crate::{Error, Execution, Executor, Result, Type, Value};

use molecule_sql::{Serializer, Statement};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Per-call context: the storage executor and the caller's cancellation
/// token.
#[derive(Debug, Clone)]
pub struct Cx<'a> {
    executor: &'a dyn Executor,
    cancel: CancellationToken,
}

impl<'a> Cx<'a> {
    pub fn new(executor: &'a dyn Executor) -> Self {
        Self {
            executor,
            cancel: CancellationToken::new(),
        }
    }

    /// Cancels storage calls once `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn executor(&self) -> &'a dyn Executor {
        self.executor
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub(crate) fn serializer(&self) -> Serializer {
        Serializer::for_capability(self.executor.capability())
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::cancelled());
        }
        Ok(())
    }

    pub(crate) async fn execute(&self, stmt: &Statement) -> Result<Execution> {
        let mut params = Vec::<Value>::new();
        let sql = self.serializer().serialize(stmt, &mut params);
        self.execute_sql(&sql, &params).await
    }

    pub(crate) async fn query(&self, stmt: &Statement, shape: &[Type]) -> Result<Vec<Vec<Value>>> {
        let mut params = Vec::<Value>::new();
        let sql = self.serializer().serialize(stmt, &mut params);
        self.query_sql(&sql, &params, shape).await
    }

    pub(crate) async fn execute_sql(&self, sql: &str, params: &[Value]) -> Result<Execution> {
        tracing::debug!(sql, "execute");
        self.guard(self.executor.execute(sql, params)).await
    }

    pub(crate) async fn query_sql(
        &self,
        sql: &str,
        params: &[Value],
        shape: &[Type],
    ) -> Result<Vec<Vec<Value>>> {
        tracing::debug!(sql, "query");
        self.guard(self.executor.query(sql, params, shape)).await
    }

    async fn guard<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        self.check()?;

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::cancelled()),
            res = fut => res,
        }
    }
}
