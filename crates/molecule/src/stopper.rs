use crate::{Connection, Record, Result};

use std::fmt::Debug;

/// Hooks into a running cascade.
pub trait Stopper: Debug + Send + Sync {
    /// Returns `true` to skip the edge. Only consulted for edges that are
    /// not part of a recursive descent.
    fn stop(&self, edge: &Edge<'_>) -> bool;

    /// Called with every row an action returns, before the row's nextpages
    /// run. An error aborts the cascade.
    fn after_row(&self, atom: &str, action: &str, row: &mut Record) -> Result<()> {
        let _ = (atom, action, row);
        Ok(())
    }
}

/// An edge about to be followed.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub phase: Phase,

    /// Atom running the action that owns the connection
    pub atom: &'a str,

    /// Action that owns the connection
    pub action: &'a str,

    pub connection: &'a Connection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prepare,
    Nextpage,
}
