use crate::Relate;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A directed edge from one action to an action of another (or the same)
/// atom.
///
/// Connections appear in an action's prepare list, where they run before
/// the action, and in its nextpage list, where they run once per result
/// row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Name of the target atom
    pub atom: String,

    /// Name of the target action
    pub action: String,

    /// Maps fields of the source record into the target's arguments
    #[serde(default, skip_serializing_if = "Relate::is_empty")]
    pub relate_args: Relate,

    /// Maps fields of the source record into the target's constraints
    #[serde(default, skip_serializing_if = "Relate::is_empty")]
    pub relate_extra: Relate,

    /// How nextpage results attach to the parent row
    #[serde(default, skip_serializing_if = "Shape::is_default")]
    pub shape: Shape,

    /// Field holding nested input for, and results of, the target action.
    /// Defaults to `<atom>_<action>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Output shape of nextpage results attached to a parent row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// The rows as returned
    #[default]
    Default,

    /// The first row, or its only field when it has exactly one
    Single,

    /// The rows as a list
    List,

    /// `{first field: second field}` over all rows
    Map,

    /// Rows grouped by their first field
    Grouped,
}

impl Connection {
    pub fn new(atom: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            atom: atom.into(),
            action: action.into(),
            relate_args: Relate::new(),
            relate_extra: Relate::new(),
            shape: Shape::Default,
            marker: None,
        }
    }

    pub fn args(mut self, relate: Relate) -> Self {
        self.relate_args = relate;
        self
    }

    pub fn extra(mut self, relate: Relate) -> Self {
        self.relate_extra = relate;
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// The field name nested input and attached results live under.
    pub fn marker(&self) -> Cow<'_, str> {
        match &self.marker {
            Some(marker) => Cow::Borrowed(marker),
            None => Cow::Owned(format!("{}_{}", self.atom, self.action)),
        }
    }

    /// Fields this connection copies out of the parent row.
    pub(crate) fn linked_fields(&self) -> Vec<String> {
        self.relate_args
            .targets()
            .chain(self.relate_extra.targets())
            .map(str::to_string)
            .collect()
    }
}

impl Shape {
    pub fn is_default(&self) -> bool {
        matches!(self, Shape::Default)
    }
}
