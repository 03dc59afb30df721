use serde::{Deserialize, Serialize};

/// Storage type of a column, as far as the engine cares.
///
/// Used as the shape hint handed to the storage executor so it can decode
/// raw driver values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Bool,

    #[serde(alias = "int", alias = "integer", alias = "bigint", alias = "smallint")]
    I64,

    #[serde(alias = "float", alias = "double", alias = "real", alias = "numeric")]
    F64,

    #[default]
    #[serde(alias = "text", alias = "varchar", alias = "char", alias = "string")]
    String,

    #[serde(alias = "blob", alias = "bytea", alias = "binary")]
    Bytes,
}

impl Type {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_i64(&self) -> bool {
        matches!(self, Self::I64)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}
