use crate::{Atom, Connection, Molecule, Record, Shape, Value};

use indexmap::map::Entry;

impl Molecule {
    /// Turns nextpage results into the value attached to the parent row.
    pub(super) fn attach(
        &self,
        current: &Atom,
        target: &Atom,
        connection: &Connection,
        rows: Vec<Record>,
    ) -> Value {
        let marker = connection.marker();
        let linked = connection.linked_fields();

        if current.table.is_recursive() || (target.table.is_recursive() && current.table.recursive_column().is_none()) {
            let mut flat = vec![];
            flatten(rows, &marker, &mut flat);
            return Value::from(shorten(flat, &linked));
        }

        if target.table.is_recursive() {
            return match connection.shape {
                Shape::Single => rows
                    .into_iter()
                    .next()
                    .map(Value::Record)
                    .unwrap_or_default(),
                _ => Value::from(rows),
            };
        }

        let rows = shorten(rows, &linked);

        match connection.shape {
            Shape::Default | Shape::List => Value::from(rows),
            Shape::Single => single(rows, &marker),
            Shape::Map => map(rows),
            Shape::Grouped => grouped(rows),
        }
    }
}

/// Hoists rows nested under `marker` next to their parent, depth first.
fn flatten(rows: Vec<Record>, marker: &str, dst: &mut Vec<Record>) {
    for mut row in rows {
        let nested = row.remove(marker);
        dst.push(row);

        if let Some(nested) = nested {
            flatten(nested.into_records(), marker, dst);
        }
    }
}

/// Drops the fields the parent row already holds.
fn shorten(mut rows: Vec<Record>, linked: &[String]) -> Vec<Record> {
    for row in &mut rows {
        for field in linked {
            row.remove(field);
        }
    }
    rows
}

fn single(rows: Vec<Record>, marker: &str) -> Value {
    if rows.len() > 1 {
        tracing::warn!(marker, rows = rows.len(), "single-row nextpage returned several rows");
    }

    let Some(row) = rows.into_iter().next() else {
        return Value::Null;
    };

    if row.len() == 1 {
        row.into_iter()
            .next()
            .map(|(_, value)| value)
            .unwrap_or_default()
    } else {
        Value::Record(row)
    }
}

/// `{key: value}` over all rows. Rows name the pair `key` and `value`, or
/// else carry it as their first two fields.
fn map(rows: Vec<Record>) -> Value {
    let mut ret = Record::new();

    for mut row in rows {
        let (key, value) = match row.remove("key") {
            Some(key) => (key, row.remove("value").unwrap_or_default()),
            None => {
                let mut fields = row.into_iter().map(|(_, value)| value);
                (
                    fields.next().unwrap_or_default(),
                    fields.next().unwrap_or_default(),
                )
            }
        };

        if key.is_blank() {
            continue;
        }

        ret.insert(key_string(&key), value);
    }

    Value::Record(ret)
}

/// Rows keyed by their first field. A key seen more than once collects its
/// rows into a list.
fn grouped(rows: Vec<Record>) -> Value {
    let mut ret = Record::new();

    for row in rows {
        let mut fields = row.into_iter();

        let Some((_, leader)) = fields.next().filter(|(_, leader)| !leader.is_blank()) else {
            continue;
        };

        let rest = Value::Record(fields.collect());

        match ret.entry(key_string(&leader)) {
            Entry::Vacant(entry) => {
                entry.insert(rest);
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Value::List(items) => items.push(rest),
                existing => {
                    let first = existing.take();
                    *existing = Value::List(vec![first, rest]);
                }
            },
        }
    }

    Value::Record(ret)
}

fn key_string(key: &Value) -> String {
    match key.as_str() {
        Some(key) => key.to_string(),
        None => key.to_string(),
    }
}
