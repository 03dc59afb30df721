use tests::*;

use molecule::{Action, Atom, Connection, Molecule, Record};
use tokio_util::sync::CancellationToken;

async fn unknown_atom_and_action(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    assert_err!(
        molecule
            .run(&cx, "nope", "topics", Record::new(), None)
            .await,
        is_atom_not_found
    );

    assert_err!(
        molecule
            .run(&cx, "m_a", "nope", Record::new(), None)
            .await,
        is_action_not_found
    );
}

async fn update_needs_primary_key(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    assert_err!(
        molecule
            .run(&cx, "m_a", "update", value!({ "z": "q" }), None)
            .await,
        is_missing_primary_key
    );

    assert_err!(
        molecule
            .run(&cx, "m_a", "update", value!({ "id": 1 }), None)
            .await,
        is_empty_input
    );

    assert!(!db.log().has("UPDATE"));
}

async fn upsert_needs_unique_key(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    assert_err!(
        molecule
            .run(&cx, "m_a", "insupd", value!({ "x": "only" }), None)
            .await,
        is_missing_unique_key
    );

    assert_err!(
        molecule
            .run(&cx, "m_b", "insupd", value!({ "child": "x" }), None)
            .await,
        is_no_unique_key_declared
    );

    assert!(db.log().is_empty());
}

async fn cancelled_context_stops_before_sql(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;

    let token = CancellationToken::new();
    token.cancel();
    let cx = db.cx().with_cancel(token);

    assert_err!(
        molecule
            .run(&cx, "m_a", "insert", value!({ "x": "a", "y": "b" }), None)
            .await,
        is_cancelled
    );
    assert!(db.log().is_empty());
}

async fn builder_rejects_dangling_connection(_db: TestDb) {
    assert_err!(
        Molecule::builder()
            .atom(
                Atom::new(fixtures::m_a_table())
                    .action(Action::insert().nextpage(Connection::new("missing", "insert"))),
            )
            .build(),
        is_atom_not_found
    );

    assert_err!(
        Molecule::builder()
            .atom(Atom::new(fixtures::m_a_table()).action(
                Action::insert().nextpage(Connection::new("m_a", "missing")),
            ))
            .build(),
        is_action_not_found
    );
}

async fn builder_rejects_duplicates(_db: TestDb) {
    assert_err!(
        Molecule::builder()
            .atom(fixtures::m_a())
            .atom(fixtures::m_a())
            .build(),
        is_invalid_schema
    );

    assert_err!(
        Molecule::builder()
            .atom(
                Atom::new(fixtures::m_b_table())
                    .action(Action::insert())
                    .action(Action::insert()),
            )
            .build(),
        is_invalid_schema
    );
}

tests!(
    unknown_atom_and_action,
    update_needs_primary_key,
    upsert_needs_unique_key,
    cancelled_context_stops_before_sql,
    builder_rejects_dangling_connection,
    builder_rejects_duplicates,
);
