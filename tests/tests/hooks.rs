use tests::*;

use molecule::{err, Edge, Phase, Record, Result, Stopper};

/// Skips every nextpage into `atom` and stamps rows of `m_a`.
#[derive(Debug)]
struct Veto {
    atom: &'static str,
}

impl Stopper for Veto {
    fn stop(&self, edge: &Edge<'_>) -> bool {
        edge.phase == Phase::Nextpage && edge.connection.atom == self.atom
    }

    fn after_row(&self, atom: &str, _action: &str, row: &mut Record) -> Result<()> {
        if atom == "m_a" {
            row.insert("checked", true);
        }
        Ok(())
    }
}

#[derive(Debug)]
struct RejectChild;

impl Stopper for RejectChild {
    fn stop(&self, _edge: &Edge<'_>) -> bool {
        false
    }

    fn after_row(&self, atom: &str, action: &str, row: &mut Record) -> Result<()> {
        if atom == "m_b" && row.get("child").and_then(|child| child.as_str()) == Some("bad") {
            return Err(err!("{atom}.{action} rejected child"));
        }
        Ok(())
    }
}

async fn stopper_skips_nextpage(db: TestDb) {
    let molecule = fixtures::molecule().with_stopper(Veto { atom: "m_b" });
    db.push(&molecule).await;

    let rows = molecule
        .run(
            &db.cx(),
            "m_a",
            "insupd",
            value!({ "x": "a", "y": "b", "m_b": [{ "child": "john" }] }),
            None,
        )
        .await
        .unwrap();

    assert_len!(rows, 1);
    assert_eq!(rows[0]["checked"], molecule::Value::from(true));
    assert_none!(rows[0].get("m_b"));
    assert!(!db.log().has("INSERT INTO \"m_b\""));
}

async fn stopper_leaves_other_edges(db: TestDb) {
    let molecule = fixtures::molecule().with_stopper(Veto { atom: "m_x" });
    db.push(&molecule).await;

    let rows = molecule
        .run(
            &db.cx(),
            "m_a",
            "insert",
            value!({ "x": "a", "y": "b", "m_b": [{ "child": "john" }] }),
            None,
        )
        .await
        .unwrap();

    assert_some!(rows[0].get("m_b"));
    assert_eq!(db.log().count("INSERT INTO \"m_b\""), 1);
}

async fn row_hook_error_aborts(db: TestDb) {
    let molecule = fixtures::molecule().with_stopper(RejectChild);
    db.push(&molecule).await;

    let err = molecule
        .run(
            &db.cx(),
            "m_a",
            "insert",
            value!({ "x": "a", "y": "b", "m_b": [{ "child": "bad" }] }),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "m_b.insert rejected child");
}

tests!(
    stopper_skips_nextpage,
    stopper_leaves_other_edges,
    row_hook_error_aborts,
);
