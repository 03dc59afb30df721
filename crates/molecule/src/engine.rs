//! The cascade driver.
//!
//! Running an action happens in three phases. Prepares run first and feed
//! their results into the action's arguments. Then the action itself runs.
//! Finally every nextpage runs once per result row and its results attach
//! to that row. Recursive tables take a separate path that walks nested
//! input level by level.

mod nextpage;
mod prepare;
mod shape;

use crate::{Atom, Cx, Error, Molecule, Record, Result, Value};

use async_recursion::async_recursion;

/// One invocation of the engine.
#[derive(Debug)]
pub(crate) struct Call<'a> {
    pub(crate) atom: &'a str,
    pub(crate) action: &'a str,
    pub(crate) args: Option<Value>,
    pub(crate) extra: Option<Record>,

    /// Set while descending through a recursive table
    pub(crate) recursive: bool,

    pub(crate) depth: usize,
}

/// Result of an invocation.
#[derive(Debug, Default)]
pub(crate) struct Step {
    pub(crate) rows: Vec<Record>,

    /// Fields the action wrote back into its arguments, top level only
    pub(crate) out: Record,
}

impl<'a> Call<'a> {
    pub(crate) fn top(atom: &'a str, action: &'a str, args: Option<Value>, extra: Option<Record>) -> Self {
        Self {
            atom,
            action,
            args,
            extra,
            recursive: false,
            depth: 0,
        }
    }

    fn nested(&self, atom: &'a str, action: &'a str, args: Option<Value>, extra: Option<Record>, recursive: bool) -> Self {
        Self {
            atom,
            action,
            args,
            extra,
            recursive,
            depth: self.depth + 1,
        }
    }
}

impl Molecule {
    #[async_recursion]
    pub(crate) async fn general<'a>(&'a self, cx: &'a Cx<'a>, mut call: Call<'a>) -> Result<Step> {
        let max_depth = self.options().max_depth;
        if call.depth > max_depth {
            return Err(Error::recursion_limit(max_depth));
        }

        cx.check()?;

        let atom = self
            .atom(call.atom)
            .ok_or_else(|| Error::atom_not_found(call.atom))?;
        let action = atom
            .get_action(call.action)
            .ok_or_else(|| Error::action_not_found(call.action, call.atom))?;

        let mut args = call.args.take().filter(|args| !args.is_blank());
        let extra = call.extra.take().filter(|extra| !extra.is_empty());

        if action.is_mutating() && args.is_none() {
            tracing::debug!(atom = call.atom, action = call.action, "no input; skipping");
            return Ok(Step::default());
        }

        tracing::debug!(
            atom = call.atom,
            action = call.action,
            depth = call.depth,
            recursive = call.recursive,
            "running action"
        );

        self.prepare(cx, &call, action, &mut args, extra.as_ref())
            .await?;

        if action.is_mutating() && !call.recursive {
            if let Some(args) = &mut args {
                for record in args.records_mut() {
                    atom.table.reconcile(record);
                }
            }
        }

        let pre_args = args.clone();
        let mut working = args.unwrap_or_else(|| Value::Record(Record::new()));

        let mut rows = action
            .run(cx, &atom.table, self.options(), &mut working, extra.as_ref())
            .await?;

        let mut out = Record::new();
        if call.depth == 0 {
            if let Some(working) = working.records().next() {
                for field in action.out_fields(self.options()) {
                    if let Some(value) = working.get(field) {
                        out.insert(field, value.clone());
                    }
                }
            }
        }

        if let Some(stopper) = self.stopper() {
            for row in &mut rows {
                stopper.after_row(call.atom, call.action, row)?;
            }
        }

        if call.recursive && !action.is_delete_prep() {
            self.descend(cx, &call, atom, action, pre_args.as_ref(), &rows)
                .await?;
            return Ok(Step { rows, out });
        }

        self.nextpages(cx, &call, atom, action, pre_args.as_ref(), extra.as_ref(), &mut rows)
            .await?;

        Ok(Step { rows, out })
    }

    /// Resolves the target of a connection.
    fn target(&self, connection: &crate::Connection) -> Result<(&Atom, &crate::Action)> {
        let atom = self
            .atom(&connection.atom)
            .ok_or_else(|| Error::atom_not_found(&connection.atom))?;
        let action = atom
            .get_action(&connection.action)
            .ok_or_else(|| Error::action_not_found(&connection.action, &connection.atom))?;
        Ok((atom, action))
    }
}

/// The arguments belonging to row `index`: the matching element when the
/// arguments are a list as long as the rows, else all of them.
fn args_for_row(args: Option<&Value>, index: usize, rows: usize) -> Option<&Value> {
    match args? {
        Value::List(items) if items.len() == rows => items.get(index),
        args => Some(args),
    }
}
