use crate::stmt::Type;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The field name callers and results use for this column. Defaults to
    /// the column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "type", default)]
    pub ty: Type,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub not_null: bool,

    /// True if the database generates the value on insert.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto: bool,

    /// True if the column takes part in a constraint the engine should
    /// respect when reading back rows.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub constraint: bool,

    /// True if the column belongs to the table's self-reference. On a
    /// primary key column this marks the anchor, on any other column the
    /// child-to-parent pointer.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recursive: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            label: None,
            ty,
            not_null: false,
            auto: false,
            constraint: false,
            recursive: false,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn auto(mut self) -> Self {
        self.auto = true;
        self
    }

    pub fn constraint(mut self) -> Self {
        self.constraint = true;
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }
}
