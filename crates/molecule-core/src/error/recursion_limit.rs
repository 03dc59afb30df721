use super::Error;

/// Error when cascading re-entered the engine more times than allowed.
///
/// This guards against cyclic prepare/nextpage configurations.
#[derive(Debug)]
pub(super) struct RecursionLimitError {
    depth: usize,
}

impl std::error::Error for RecursionLimitError {}

impl core::fmt::Display for RecursionLimitError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cascade exceeded maximum depth of {}", self.depth)
    }
}

impl Error {
    pub fn recursion_limit(depth: usize) -> Error {
        Error::from(super::ErrorKind::RecursionLimit(RecursionLimitError { depth }))
    }

    pub fn is_recursion_limit(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecursionLimit(_))
    }
}
