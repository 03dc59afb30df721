use super::{args_for_row, Call};
use crate::{relate, Action, Atom, Cx, Edge, Molecule, Phase, Record, Result, Value};

impl Molecule {
    /// Runs every nextpage of `action` once per row and attaches the results
    /// to the row under the connection's marker.
    #[allow(clippy::too_many_arguments)]
    pub(super) async fn nextpages<'a>(
        &'a self,
        cx: &'a Cx<'a>,
        call: &Call<'a>,
        atom: &'a Atom,
        action: &'a Action,
        args: Option<&Value>,
        extra: Option<&Record>,
        rows: &mut [Record],
    ) -> Result<()> {
        let count = rows.len();

        for connection in &action.nextpages {
            let (target_atom, target_action) = self.target(connection)?;
            let marker = connection.marker();

            for (index, row) in rows.iter_mut().enumerate() {
                let current = args_for_row(args, index, count);
                let nested = current.and_then(|current| relate::marker_value(current, &marker));
                let nested_extra = extra.and_then(|extra| relate::marker_record(extra, &marker));

                let mut next_args =
                    relate::project_record(&connection.relate_args, row).map(Value::Record);
                let next_extra = relate::merge_records(
                    relate::project_record(&connection.relate_extra, row),
                    nested_extra,
                    true,
                );

                if target_action.needs_nested_input() {
                    let Some(nested) = nested else {
                        tracing::trace!(
                            atom = call.atom,
                            action = call.action,
                            marker = %marker,
                            "no nested input; skipping nextpage"
                        );
                        continue;
                    };

                    next_args = relate::merge(Some(nested), next_args, true);
                } else {
                    if !target_action.is_mutating() && next_args.is_none() && next_extra.is_none() {
                        continue;
                    }

                    if let Some(nested) = nested {
                        next_args = relate::merge(Some(nested), next_args, true);
                    }
                }

                let edge = Edge {
                    phase: Phase::Nextpage,
                    atom: call.atom,
                    action: call.action,
                    connection,
                };

                if self.stopper().is_some_and(|stopper| stopper.stop(&edge)) {
                    tracing::debug!(
                        atom = call.atom,
                        action = call.action,
                        marker = %marker,
                        "nextpage stopped"
                    );
                    continue;
                }

                let next = call.nested(&connection.atom, &connection.action, next_args, next_extra, false);
                let children = self.general(cx, next).await?.rows;

                if children.is_empty() {
                    continue;
                }

                let value = self.attach(atom, target_atom, connection, children);
                row.insert(marker.as_ref(), value);
            }
        }

        Ok(())
    }

    /// Walks nested input of a recursive table one level down: each row
    /// becomes the parent of the input nested under the first connection
    /// into a table with a parent pointer.
    ///
    /// Stops when `atom` has no parent pointer of its own, or when none of
    /// the action's nextpages leads to a table that has one.
    pub(super) async fn descend<'a>(
        &'a self,
        cx: &'a Cx<'a>,
        call: &Call<'a>,
        atom: &'a Atom,
        action: &'a Action,
        args: Option<&Value>,
        rows: &[Record],
    ) -> Result<()> {
        if !atom.table.is_recursive() {
            return Ok(());
        }

        let connection = action.nextpages.iter().find(|connection| {
            self.atom(&connection.atom)
                .is_some_and(|atom| atom.table.recursive_column().is_some())
        });

        let Some(connection) = connection else {
            return Ok(());
        };

        let marker = connection.marker();

        for (index, row) in rows.iter().enumerate() {
            let Some(nested) = args_for_row(args, index, rows.len())
                .and_then(|current| relate::marker_value(current, &marker))
            else {
                continue;
            };

            let parent = relate::project_record(&connection.relate_args, row).map(Value::Record);
            let next_args = relate::merge(Some(nested), parent, true);

            let next = call.nested(&connection.atom, &connection.action, next_args, None, true);
            self.general(cx, next).await?;
        }

        Ok(())
    }
}
