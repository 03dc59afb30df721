use super::Error;

#[derive(Debug)]
pub(super) struct UnknownColumnError {
    name: Box<str>,
}

impl std::error::Error for UnknownColumnError {}

impl core::fmt::Display for UnknownColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown column `{}`", self.name)
    }
}

impl Error {
    /// Creates an error for a column name that no table descriptor declares.
    pub fn unknown_column(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownColumn(UnknownColumnError {
            name: name.into().into(),
        }))
    }

    pub fn is_unknown_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownColumn(_))
    }
}
