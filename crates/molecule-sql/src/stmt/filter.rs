use super::{ColumnRef, Value};

/// Conditions joined with `AND`. An empty filter matches every row.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub column: ColumnRef,
    pub op: Op,
}

#[derive(Debug, Clone)]
pub enum Op {
    Eq(Value),
    In(Vec<Value>),
    IsNull,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Adds a condition on `column`: `IS NULL` for null, `IN` for a list,
    /// equality otherwise.
    pub fn push(&mut self, column: impl Into<ColumnRef>, value: Value) {
        let op = match value {
            Value::Null => Op::IsNull,
            Value::List(items) => Op::In(items),
            value => Op::Eq(value),
        };

        self.conditions.push(Condition {
            column: column.into(),
            op,
        });
    }

    pub fn contains(&self, column: &str) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.column.name == column)
    }
}
