use super::{Filter, Statement, Value};

#[derive(Debug, Clone)]
pub struct Update {
    pub table: String,

    pub assignments: Vec<(String, Value)>,

    pub filter: Filter,
}

impl Statement {
    pub fn update(table: impl Into<String>, assignments: Vec<(String, Value)>, filter: Filter) -> Self {
        Update {
            table: table.into(),
            assignments,
            filter,
        }
        .into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
