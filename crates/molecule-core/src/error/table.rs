use super::Error;

/// Error raised by an action that cannot run against its table with the
/// arguments it was given.
#[derive(Debug)]
pub(super) struct TableError {
    kind: TableErrorKind,
    table: Box<str>,
}

#[derive(Debug, PartialEq)]
enum TableErrorKind {
    MissingPrimaryKey,
    EmptyInput,
    WholeTableDeleteRefused,
    MissingForeignOrPrimaryKeys,
    NoUniqueKeyDeclared,
    MissingUniqueKey,
    AmbiguousUniqueMatch,
}

impl std::error::Error for TableError {}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let table = &self.table;

        match self.kind {
            TableErrorKind::MissingPrimaryKey => {
                write!(f, "missing primary key for table `{table}`")
            }
            TableErrorKind::EmptyInput => write!(f, "no input columns for table `{table}`"),
            TableErrorKind::WholeTableDeleteRefused => {
                write!(f, "refusing to delete every row of table `{table}`")
            }
            TableErrorKind::MissingForeignOrPrimaryKeys => {
                write!(f, "no primary or foreign key columns to read in table `{table}`")
            }
            TableErrorKind::NoUniqueKeyDeclared => {
                write!(f, "table `{table}` declares no unique key")
            }
            TableErrorKind::MissingUniqueKey => {
                write!(f, "unique key values missing for table `{table}`")
            }
            TableErrorKind::AmbiguousUniqueMatch => {
                write!(f, "unique key matched more than one row in table `{table}`")
            }
        }
    }
}

macro_rules! table_errors {
    ( $( $(#[$attr:meta])* $ctor:ident, $pred:ident => $kind:ident; )* ) => {
        impl Error {
            $(
                $(#[$attr])*
                pub fn $ctor(table: impl Into<String>) -> Error {
                    Error::from(super::ErrorKind::Table(TableError {
                        kind: TableErrorKind::$kind,
                        table: table.into().into(),
                    }))
                }

                pub fn $pred(&self) -> bool {
                    matches!(
                        self.kind(),
                        super::ErrorKind::Table(TableError { kind: TableErrorKind::$kind, .. })
                    )
                }
            )*
        }
    };
}

table_errors! {
    /// No primary key value could be resolved from arguments or constraints.
    missing_primary_key, is_missing_primary_key => MissingPrimaryKey;

    /// None of the supplied fields map to a writable column.
    empty_input, is_empty_input => EmptyInput;

    /// A delete would have run without any condition.
    whole_table_delete_refused, is_whole_table_delete_refused => WholeTableDeleteRefused;

    /// A delete-cascade-prep found nothing to read back.
    missing_foreign_or_primary_keys, is_missing_foreign_or_primary_keys => MissingForeignOrPrimaryKeys;

    /// An upsert ran against a table without a uniqueness group.
    no_unique_key_declared, is_no_unique_key_declared => NoUniqueKeyDeclared;

    /// An upsert was missing one of the uniqueness group's values.
    missing_unique_key, is_missing_unique_key => MissingUniqueKey;

    /// An upsert's uniqueness lookup returned more than one row.
    ambiguous_unique_match, is_ambiguous_unique_match => AmbiguousUniqueMatch;
}
