use super::Error;

/// Error when an atom or action lookup fails.
#[derive(Debug)]
pub(super) struct NotFoundError {
    kind: NotFoundKind,
}

#[derive(Debug)]
enum NotFoundKind {
    Atom { atom: Box<str> },
    Action { action: Box<str>, atom: Box<str> },
}

impl std::error::Error for NotFoundError {}

impl core::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            NotFoundKind::Atom { atom } => write!(f, "atom `{atom}` not found"),
            NotFoundKind::Action { action, atom } => {
                write!(f, "action `{action}` not found in atom `{atom}`")
            }
        }
    }
}

impl Error {
    /// Creates an error for a molecule that has no atom with the given name.
    pub fn atom_not_found(atom: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotFound(NotFoundError {
            kind: NotFoundKind::Atom {
                atom: atom.into().into(),
            },
        }))
    }

    /// Creates an error for an atom that has no action with the given name.
    pub fn action_not_found(action: impl Into<String>, atom: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotFound(NotFoundError {
            kind: NotFoundKind::Action {
                action: action.into().into(),
                atom: atom.into().into(),
            },
        }))
    }

    pub fn is_atom_not_found(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::NotFound(NotFoundError {
                kind: NotFoundKind::Atom { .. }
            })
        )
    }

    pub fn is_action_not_found(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::NotFound(NotFoundError {
                kind: NotFoundKind::Action { .. }
            })
        )
    }
}
