use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{ColumnRef, Condition, Filter, Op};

impl ToSql for &ColumnRef {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if let Some(qualifier) = &self.qualifier {
            fmt!(f, Ident(qualifier) ".");
        }

        fmt!(f, Ident(&self.name));
    }
}

/// Serializes as ` WHERE ...`, or nothing for an empty filter.
impl ToSql for &Filter {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let mut s = " WHERE ";
        for condition in &self.conditions {
            fmt!(f, s condition);
            s = " AND ";
        }
    }
}

impl ToSql for &Condition {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match &self.op {
            Op::Eq(value) => fmt!(f, &self.column " = " value),
            Op::IsNull => fmt!(f, &self.column " IS NULL"),
            // `IN ()` is not valid SQL; an empty list matches nothing.
            Op::In(values) if values.is_empty() => fmt!(f, "1 = 0"),
            Op::In(values) => fmt!(f, &self.column " IN (" Comma(values) ")"),
        }
    }
}
