use super::Error;

/// Error when the caller's cancellation token fired before or during a
/// storage call.
#[derive(Debug)]
pub(super) struct CancelledError;

impl std::error::Error for CancelledError {}

impl core::fmt::Display for CancelledError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl Error {
    pub fn cancelled() -> Error {
        Error::from(super::ErrorKind::Cancelled(CancelledError))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Cancelled(_))
    }
}
