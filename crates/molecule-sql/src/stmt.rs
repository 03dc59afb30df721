mod create_table;
pub use create_table::{ColumnDef, CreateTable};

mod delete;
pub use delete::Delete;

mod filter;
pub use filter::{Condition, Filter, Op};

mod insert;
pub use insert::Insert;

mod select;
pub use select::{ColumnRef, Join, JoinConstraint, JoinKind, Limit, Select, TableRef};

mod update;
pub use update::Update;

pub use molecule_core::stmt::{Record, Type, Value};

#[derive(Debug, Clone)]
pub enum Statement {
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// Returns the number of columns the statement returns, if it returns rows.
    pub fn returning_len(&self) -> Option<usize> {
        match self {
            Statement::Select(select) if select.count => Some(1),
            Statement::Select(select) => Some(select.columns.len()),
            Statement::Insert(insert) => insert.returning.as_ref().map(|_| 1),
            _ => None,
        }
    }
}
