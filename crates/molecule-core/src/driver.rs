mod capability;
pub use capability::{Capability, Dialect};

mod execution;
pub use execution::Execution;

use crate::{async_trait, schema::Table, stmt, Result};

use std::fmt::Debug;

/// The storage collaborator the engine runs statements against.
///
/// An executor owns the SQL dialect and the database driver. Actions build
/// statements with the placeholder syntax named by [`Executor::capability`]
/// and hand them over together with their positional parameters.
#[async_trait]
pub trait Executor: Debug + Send + Sync + 'static {
    /// Describes the executor's dialect, which informs statement building.
    fn capability(&self) -> &Capability;

    /// Run a statement that returns no rows.
    async fn execute(&self, sql: &str, params: &[stmt::Value]) -> Result<Execution>;

    /// Run a statement returning rows. `shape` holds one type per returned
    /// column and tells the executor how to decode them.
    async fn query(
        &self,
        sql: &str,
        params: &[stmt::Value],
        shape: &[stmt::Type],
    ) -> Result<Vec<Vec<stmt::Value>>>;

    /// Create the given tables if they do not exist yet.
    async fn push_schema(&self, tables: &[Table]) -> Result<()>;
}
