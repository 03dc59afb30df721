use super::{Statement, Type};

use molecule_core::schema::Table;

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Primary key columns
    pub primary_key: Vec<String>,

    pub unique: Vec<String>,

    /// `(column, referenced table, referenced column)`
    pub foreign_keys: Vec<(String, String, String)>,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub not_null: bool,
    pub auto_increment: bool,
}

impl Statement {
    pub fn create_table(table: &Table) -> Self {
        CreateTable {
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|column| ColumnDef {
                    name: column.name.clone(),
                    ty: column.ty,
                    not_null: column.not_null,
                    auto_increment: column.auto
                        && table.id_auto.as_deref() == Some(column.name.as_str()),
                })
                .collect(),
            primary_key: table.pks.clone(),
            unique: table.uniques.clone(),
            foreign_keys: table
                .fks
                .iter()
                .map(|fk| (fk.column.clone(), fk.ref_table.clone(), fk.ref_column.clone()))
                .collect(),
        }
        .into()
    }
}

impl CreateTable {
    /// The auto-increment column, when it is the whole primary key.
    pub fn auto_primary_key(&self) -> Option<&ColumnDef> {
        let [pk] = &self.primary_key[..] else {
            return None;
        };

        self.columns
            .iter()
            .find(|column| column.auto_increment && column.name == *pk)
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
