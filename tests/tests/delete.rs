use tests::*;

use molecule::{record, Record, Value};

async fn delete_cascades_to_children(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    molecule
        .run(
            &cx,
            "m_a",
            "insert",
            value!([
                { "x": "a", "y": "b", "m_b": [{ "child": "john" }, { "child": "john2" }] },
                { "x": "c", "y": "d", "m_b": [{ "child": "sam" }] },
            ]),
            None,
        )
        .await
        .unwrap();

    db.log().clear();

    let rows = molecule
        .run(&cx, "m_a", "delete", value!({ "id": 1 }), None)
        .await
        .unwrap();

    assert_empty!(rows);

    let deletes: Vec<_> = db
        .log()
        .sql()
        .into_iter()
        .filter(|sql| sql.starts_with("DELETE"))
        .collect();

    assert_len!(deletes, 2);
    assert!(deletes[0].starts_with("DELETE FROM \"m_b\""));
    assert!(deletes[1].starts_with("DELETE FROM \"m_a\""));

    let rows = molecule
        .run(&cx, "m_a", "topics", Record::new(), None)
        .await
        .unwrap();

    assert_eq!(
        Value::from(rows),
        value!([{
            "id": 2,
            "x": "c",
            "y": "d",
            "z": null,
            "m_b": [{ "tid": 3, "child": "sam" }],
        }])
    );
}

async fn prepared_child_cascade_keeps_arguments(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    assert_ok!(
        molecule
            .run(
                &cx,
                "m_a",
                "insert",
                value!([
                    { "x": "a", "y": "b", "m_b": [{ "child": "john" }, { "child": "john2" }] },
                    { "x": "c", "y": "d", "m_b": [{ "child": "sam" }] },
                ]),
                None,
            )
            .await
    );
    db.log().clear();

    // The child cascade reads back two rows. The parent delete still runs
    // once, with the caller's arguments.
    let rows = assert_ok!(
        molecule
            .run(&cx, "m_a", "purge", value!({ "id": 1 }), Some(record! { "id" => 1 }))
            .await
    );

    assert_empty!(rows);
    assert_eq!(db.log().count("DELETE FROM \"m_b\""), 2);
    assert_eq!(db.log().count("DELETE FROM \"m_a\""), 1);

    let rows = assert_ok!(molecule.run(&cx, "m_a", "topics", Record::new(), None).await);

    assert_eq!(
        Value::from(rows),
        value!([{
            "id": 2,
            "x": "c",
            "y": "d",
            "z": null,
            "m_b": [{ "tid": 3, "child": "sam" }],
        }])
    );
}

async fn delete_without_key_is_refused(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;

    assert_err!(
        molecule
            .run(&db.cx(), "m_b", "delete", value!({ "child": "john" }), None)
            .await,
        is_whole_table_delete_refused
    );
    assert!(!db.log().has("DELETE"));
}

async fn mutations_without_input_do_nothing(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    let rows = molecule
        .run(&cx, "m_a", "delete", Record::new(), None)
        .await
        .unwrap();
    assert_empty!(rows);

    let rows = molecule
        .run(&cx, "m_a", "insert", Value::Null, None)
        .await
        .unwrap();
    assert_empty!(rows);

    assert!(db.log().is_empty());
}

tests!(
    delete_cascades_to_children,
    prepared_child_cascade_keeps_arguments,
    delete_without_key_is_refused,
    mutations_without_input_do_nothing,
);
