use serde::{Deserialize, Serialize};

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Whether list actions compute a total row count when paging.
    ///
    /// `0` never counts. `-1` runs a `COUNT(*)` unless the caller already
    /// supplied a total. Any other negative value is used as the total.
    pub total_force: i64,

    /// Maximum nesting of cascaded action calls.
    pub max_depth: usize,

    /// Names of the pagination fields read from and written back to the
    /// caller's arguments.
    pub fields: PageFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageFields {
    pub sortby: String,
    pub sortreverse: String,
    pub rowcount: String,
    pub pageno: String,
    pub totalno: String,
    pub maxpageno: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            total_force: 0,
            max_depth: 32,
            fields: PageFields::default(),
        }
    }
}

impl Default for PageFields {
    fn default() -> Self {
        Self {
            sortby: "sortby".to_string(),
            sortreverse: "sortreverse".to_string(),
            rowcount: "rowcount".to_string(),
            pageno: "pageno".to_string(),
            totalno: "totalno".to_string(),
            maxpageno: "maxpageno".to_string(),
        }
    }
}
