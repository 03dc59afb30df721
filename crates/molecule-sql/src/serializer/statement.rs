use super::{Comma, Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt::{
    CreateTable, Delete, Insert, Join, JoinConstraint, JoinKind, Select, Statement, TableRef,
    Update,
};

impl ToSql for &Statement {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &CreateTable {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let inline_pk = match f.serializer.flavor {
            Flavor::Sqlite => self.auto_primary_key().map(|column| &column.name),
            _ => None,
        };

        fmt!(f, "CREATE TABLE IF NOT EXISTS " Ident(&self.name) " (");

        let mut s = "";
        for column in &self.columns {
            fmt!(f, s column);
            if inline_pk == Some(&column.name) {
                fmt!(f, " PRIMARY KEY AUTOINCREMENT");
            }
            s = ", ";
        }

        if inline_pk.is_none() && !self.primary_key.is_empty() {
            fmt!(f, ", PRIMARY KEY (" Comma(self.primary_key.iter().map(Ident)) ")");
        }

        if !self.unique.is_empty() {
            fmt!(f, ", UNIQUE (" Comma(self.unique.iter().map(Ident)) ")");
        }

        for (column, ref_table, ref_column) in &self.foreign_keys {
            fmt!(
                f,
                ", FOREIGN KEY (" Ident(column) ") REFERENCES " Ident(ref_table) " (" Ident(ref_column) ")"
            );
        }

        fmt!(f, ")");
    }
}

impl ToSql for &Insert {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "INSERT INTO " Ident(&self.table));

        if self.columns.is_empty() {
            match f.serializer.flavor {
                Flavor::Mysql => fmt!(f, " () VALUES ()"),
                _ => fmt!(f, " DEFAULT VALUES"),
            }
        } else {
            fmt!(
                f,
                " (" Comma(self.columns.iter().map(Ident)) ") VALUES (" Comma(&self.values) ")"
            );
        }

        if let Some(returning) = &self.returning {
            fmt!(f, " RETURNING " Ident(returning));
        }
    }
}

impl ToSql for &Update {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "UPDATE " Ident(&self.table) " SET ");

        let mut s = "";
        for (column, value) in &self.assignments {
            fmt!(f, s Ident(column) " = " value);
            s = ", ";
        }

        fmt!(f, &self.filter);
    }
}

impl ToSql for &Delete {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let filter = &self.filter;
        fmt!(f, "DELETE FROM " Ident(&self.table) filter);
    }
}

impl ToSql for &Select {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if self.count {
            fmt!(f, "SELECT COUNT(*)");
        } else {
            fmt!(f, "SELECT " Comma(&self.columns));
        }

        let from = &self.from;
        fmt!(f, " FROM " from);

        for join in &self.joins {
            fmt!(f, join);
        }

        fmt!(f, &self.filter);

        if let Some(order_by) = &self.order_by {
            fmt!(f, " ORDER BY " order_by);
        }

        if let Some(limit) = &self.limit {
            fmt!(f, " LIMIT " limit.count);
            if limit.offset > 0 {
                fmt!(f, " OFFSET " limit.offset);
            }
        }
    }
}

impl ToSql for &TableRef {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(&self.name));

        if let Some(alias) = &self.alias {
            fmt!(f, " AS " Ident(alias));
        }
    }
}

impl ToSql for &Join {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let kind = match self.kind {
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::Left => " LEFT JOIN ",
        };

        let table = &self.table;
        fmt!(f, kind table);

        match &self.constraint {
            JoinConstraint::Using(columns) => {
                fmt!(f, " USING (" Comma(columns.iter().map(Ident)) ")")
            }
            JoinConstraint::On(condition) => fmt!(f, " ON " condition),
        }
    }
}
