/// Outcome of a statement that returns no rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub rows_affected: u64,

    /// Id generated by the statement, if the table has an auto column.
    pub last_insert_id: Option<i64>,
}

impl Execution {
    pub fn count(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            last_insert_id: None,
        }
    }

    pub fn inserted(last_insert_id: i64) -> Self {
        Self {
            rows_affected: 1,
            last_insert_id: Some(last_insert_id),
        }
    }
}
