use crate::{relate, Atom, Connection, Cx, Error, Options, Record, Result, Stopper, Value};

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::Arc};

/// A set of atoms whose actions cascade into each other.
///
/// The molecule is immutable once built and may be shared between tasks;
/// every call gets its own [`Cx`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Molecule {
    atoms: Vec<Atom>,

    #[serde(default)]
    options: Options,

    #[serde(skip)]
    stopper: Option<Arc<dyn Stopper>>,
}

/// Assembles and verifies a [`Molecule`].
#[derive(Debug, Default)]
pub struct Builder {
    atoms: Vec<Atom>,
    options: Options,
    stopper: Option<Arc<dyn Stopper>>,
}

impl Molecule {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Loads a molecule from its JSON description.
    pub fn from_json(json: &str) -> Result<Molecule> {
        let molecule: Molecule = serde_json::from_str(json)?;
        molecule.verify()?;
        Ok(molecule)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Installs hooks consulted while cascading.
    pub fn with_stopper(mut self, stopper: impl Stopper + 'static) -> Self {
        self.stopper = Some(Arc::new(stopper));
        self
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|atom| atom.name() == name)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub(crate) fn stopper(&self) -> Option<&dyn Stopper> {
        self.stopper.as_deref()
    }

    /// Runs `action` of `atom`, then everything it cascades into.
    pub async fn run(
        &self,
        cx: &Cx<'_>,
        atom: &str,
        action: &str,
        args: impl Into<Value>,
        extra: Option<Record>,
    ) -> Result<Vec<Record>> {
        let mut args = args.into();
        self.run_mut(cx, atom, action, &mut args, extra).await
    }

    /// Like [`Molecule::run`], but writes fields the action produces for the
    /// caller, such as paging totals, back into `args`.
    pub async fn run_mut(
        &self,
        cx: &Cx<'_>,
        atom: &str,
        action: &str,
        args: &mut Value,
        extra: Option<Record>,
    ) -> Result<Vec<Record>> {
        let step = self
            .general(
                cx,
                crate::engine::Call::top(atom, action, relate::clone_args(Some(&*args)), extra),
            )
            .await?;

        let written = args
            .records_mut()
            .next()
            .map(|args| args.extend_from(&step.out))
            .is_some();

        if !written && !step.out.is_empty() {
            *args = Value::Record(step.out);
        }

        Ok(step.rows)
    }

    fn verify(&self) -> Result<()> {
        let mut names = HashSet::new();

        for atom in &self.atoms {
            if !names.insert(atom.name()) {
                return Err(Error::invalid_schema(format!(
                    "atom `{}` declared twice",
                    atom.name()
                )));
            }

            atom.verify()?;
        }

        for atom in &self.atoms {
            for action in &atom.actions {
                for connection in action.prepares.iter().chain(&action.nextpages) {
                    self.verify_connection(connection).map_err(|err| {
                        err.context(format!(
                            "connection of `{}.{}`",
                            atom.name(),
                            action.name
                        ))
                    })?;
                }

                if let crate::ActionKind::Topics(topics) = &action.kind {
                    let main = topics
                        .joints
                        .first()
                        .is_some_and(|joint| joint.table == atom.name());

                    for joint in topics.joints.iter().skip(usize::from(main)) {
                        if joint.using.is_empty() && joint.on.is_none() {
                            return Err(Error::invalid_schema(format!(
                                "join of `{}` in `{}.{}` has no condition",
                                joint.table,
                                atom.name(),
                                action.name
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn verify_connection(&self, connection: &Connection) -> Result<()> {
        let atom = self
            .atom(&connection.atom)
            .ok_or_else(|| Error::atom_not_found(&connection.atom))?;

        atom.get_action(&connection.action)
            .ok_or_else(|| Error::action_not_found(&connection.action, &connection.atom))?;

        Ok(())
    }
}

impl Builder {
    pub fn atom(mut self, atom: Atom) -> Self {
        self.atoms.push(atom);
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn stopper(mut self, stopper: impl Stopper + 'static) -> Self {
        self.stopper = Some(Arc::new(stopper));
        self
    }

    pub fn build(self) -> Result<Molecule> {
        let molecule = Molecule {
            atoms: self.atoms,
            options: self.options,
            stopper: self.stopper,
        };

        molecule.verify()?;
        Ok(molecule)
    }
}
