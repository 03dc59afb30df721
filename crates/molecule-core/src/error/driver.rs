use super::Error;

use std::iter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure reported by the storage executor. Passed through unchanged.
#[derive(Debug)]
pub(super) struct DriverError {
    cause: BoxError,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let chain = iter::successors(
            Some(self.cause.as_ref() as &(dyn std::error::Error + 'static)),
            |err| err.source(),
        );

        for (i, err) in chain.enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            core::fmt::Display::fmt(err, f)?;
        }

        Ok(())
    }
}

impl Error {
    /// Wraps an error raised by a storage driver.
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Driver(DriverError {
            cause: Box::new(err),
        }))
    }

    pub fn is_driver(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Driver(_))
    }
}
