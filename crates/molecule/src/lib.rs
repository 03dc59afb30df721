pub mod action;
pub use action::{Action, ActionKind};

mod atom;
pub use atom::Atom;

pub mod connection;
pub use connection::{Connection, Shape};

mod cx;
pub use cx::Cx;

mod engine;

mod molecule;
pub use molecule::{Builder, Molecule};

mod options;
pub use options::{Options, PageFields};

pub mod relate;
pub use relate::Relate;

mod stopper;
pub use stopper::{Edge, Phase, Stopper};

pub use molecule_core::{
    bail, err, record,
    driver::{Capability, Execution, Executor},
    schema::{Column, ForeignKey, Table},
    stmt::{Record, Type, Value},
    Error, Result,
};
