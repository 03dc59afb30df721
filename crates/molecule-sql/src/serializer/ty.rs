use super::{Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt::ColumnDef;
use molecule_core::stmt::Type;

impl ToSql for &ColumnDef {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let flavor = f.serializer.flavor;

        let ty = match (flavor, self.ty) {
            (Flavor::Sqlite, Type::Bool | Type::I64) => "INTEGER",
            (Flavor::Sqlite, Type::F64) => "REAL",
            (Flavor::Sqlite, Type::String) => "TEXT",
            (Flavor::Sqlite, Type::Bytes) => "BLOB",
            (Flavor::Postgresql, Type::I64) if self.auto_increment => "BIGSERIAL",
            (Flavor::Postgresql, Type::F64) => "DOUBLE PRECISION",
            (Flavor::Postgresql, Type::String) => "TEXT",
            (Flavor::Postgresql, Type::Bytes) => "BYTEA",
            (Flavor::Mysql, Type::F64) => "DOUBLE",
            (Flavor::Mysql, Type::String) => "VARCHAR(255)",
            (Flavor::Mysql, Type::Bytes) => "BLOB",
            (_, Type::Bool) => "BOOLEAN",
            (_, Type::I64) => "BIGINT",
        };

        fmt!(f, Ident(&self.name) " " ty);

        if self.not_null {
            fmt!(f, " NOT NULL");
        }

        if self.auto_increment && flavor == Flavor::Mysql {
            fmt!(f, " AUTO_INCREMENT");
        }
    }
}
