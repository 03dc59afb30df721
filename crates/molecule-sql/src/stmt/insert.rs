use super::{Statement, Value};

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: String,

    pub columns: Vec<String>,

    pub values: Vec<Value>,

    /// Column to report through `RETURNING`
    pub returning: Option<String>,
}

impl Statement {
    pub fn insert(table: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        let (columns, values) = fields.into_iter().unzip();

        Insert {
            table: table.into(),
            columns,
            values,
            returning: None,
        }
        .into()
    }
}

impl Insert {
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        self.returning = Some(column.into());
        self
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
