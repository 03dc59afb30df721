use super::{Filter, Statement};

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,

    pub filter: Filter,
}

impl Statement {
    pub fn delete(table: impl Into<String>, filter: Filter) -> Self {
        Delete {
            table: table.into(),
            filter,
        }
        .into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
