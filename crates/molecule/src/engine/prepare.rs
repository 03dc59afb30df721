use super::Call;
use crate::{relate, Action, Cx, Edge, Molecule, Phase, Record, Result, Value};

impl Molecule {
    /// Runs the prepares of `action`, folding their results into `args`.
    ///
    /// A prepare returning one row merges it into the arguments. One
    /// returning several rows either fans the action out over them, one
    /// argument record per row, which ends prepare processing. Or, when the
    /// prepared action lets fan-out continue, the rows are ignored.
    pub(super) async fn prepare<'a>(
        &'a self,
        cx: &'a Cx<'a>,
        call: &Call<'a>,
        action: &'a Action,
        args: &mut Option<Value>,
        extra: Option<&Record>,
    ) -> Result<()> {
        for connection in &action.prepares {
            let (target_atom, target_action) = self.target(connection)?;
            let marker = connection.marker();

            let input = relate::merge(
                args.as_ref()
                    .and_then(|args| relate::project(&connection.relate_args, args)),
                args.as_ref()
                    .and_then(|args| relate::marker_value(args, &marker)),
                false,
            );

            let constraints = relate::merge_records(
                extra.and_then(|extra| relate::project_record(&connection.relate_extra, extra)),
                extra.and_then(|extra| relate::marker_record(extra, &marker)),
                true,
            );

            let recursive = call.recursive
                || (target_action.is_mutating() && target_atom.table.is_recursive());

            let rows = if recursive {
                let input = input.map(|input| relate::strip_fields(input, &target_atom.table.pks));
                let next = call.nested(&connection.atom, &connection.action, input, constraints, true);
                self.general(cx, next).await?.rows
            } else {
                let edge = Edge {
                    phase: Phase::Prepare,
                    atom: call.atom,
                    action: call.action,
                    connection,
                };

                if self.stopper().is_some_and(|stopper| stopper.stop(&edge)) {
                    tracing::debug!(
                        atom = call.atom,
                        action = call.action,
                        target = %connection.marker(),
                        "prepare stopped"
                    );
                    continue;
                }

                let next = call.nested(&connection.atom, &connection.action, input, constraints, false);
                self.general(cx, next).await?.rows
            };

            match rows.len() {
                0 => {}
                1 => {
                    let mut row = Value::Record(rows.into_iter().next().unwrap_or_default());
                    if recursive {
                        row = relate::strip_fields(row, &target_atom.table.pks);
                    }
                    *args = relate::merge(args.take(), Some(row), true);
                }
                _ if target_action.fanout_continues() => {}
                _ => {
                    let rows = if recursive {
                        relate::strip_fields(Value::from(rows), &target_atom.table.pks).into_records()
                    } else {
                        rows
                    };
                    *args = Some(relate::fan_out(args.take(), rows));
                    break;
                }
            }
        }

        Ok(())
    }
}
