mod value;
pub(crate) use value::Value;

use molecule_core::{
    async_trait,
    driver::{Capability, Execution, Executor},
    schema::Table,
    stmt, Error, Result,
};
use molecule_sql::{Serializer, Statement};
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use url::Url;

/// A storage executor backed by a single SQLite connection.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<RusqliteConnection>,
    location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Open a SQLite database from a connection URL, `sqlite::memory:` or
    /// `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_schema(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self::from_connection(connection, Location::InMemory))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let connection = RusqliteConnection::open(&path).map_err(Error::driver)?;
        Ok(Self::from_connection(connection, Location::File(path)))
    }

    fn from_connection(connection: RusqliteConnection, location: Location) -> Self {
        Self {
            connection: Mutex::new(connection),
            location,
        }
    }

    pub fn url(&self) -> String {
        match &self.location {
            Location::InMemory => "sqlite::memory:".to_string(),
            Location::File(path) => format!("sqlite:{}", path.display()),
        }
    }
}

#[async_trait]
impl Executor for Sqlite {
    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }

    async fn execute(&self, sql: &str, params: &[stmt::Value]) -> Result<Execution> {
        tracing::trace!(sql, params = params.len(), "sqlite execute");

        let connection = self.connection.lock().await;
        let mut stmt = connection.prepare_cached(sql).map_err(Error::driver)?;

        let params = params
            .iter()
            .cloned()
            .map(Value::from)
            .collect::<Vec<_>>();

        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut execution = Execution::count(count as u64);
        if sql.starts_with("INSERT") && count > 0 {
            execution.last_insert_id = Some(connection.last_insert_rowid());
        }

        Ok(execution)
    }

    async fn query(
        &self,
        sql: &str,
        params: &[stmt::Value],
        shape: &[stmt::Type],
    ) -> Result<Vec<Vec<stmt::Value>>> {
        tracing::trace!(sql, params = params.len(), "sqlite query");

        let connection = self.connection.lock().await;
        let mut stmt = connection.prepare_cached(sql).map_err(Error::driver)?;

        let params = params
            .iter()
            .cloned()
            .map(Value::from)
            .collect::<Vec<_>>();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut items = Vec::with_capacity(shape.len());

            for (index, ty) in shape.iter().enumerate() {
                items.push(Value::from_sql(row, index, ty)?.into_inner());
            }

            ret.push(items);
        }

        Ok(ret)
    }

    async fn push_schema(&self, tables: &[Table]) -> Result<()> {
        let serializer = Serializer::sqlite();
        let connection = self.connection.lock().await;

        for table in tables {
            let mut params = Vec::<stmt::Value>::new();
            let sql = serializer.serialize(&Statement::create_table(table), &mut params);
            debug_assert!(params.is_empty(), "create table takes no parameters");

            tracing::debug!(table = %table.name, "creating table");
            connection.execute(&sql, []).map_err(Error::driver)?;
        }

        Ok(())
    }
}
