use tests::*;

use molecule::{record, Molecule, Options, Record, Value};

async fn seed(molecule: &Molecule, db: &TestDb, count: usize) {
    let cx = db.cx();

    for i in 0..count {
        molecule
            .run(&cx, "m_a", "insert", value!({ "x": format!("x{i:02}"), "y": "y" }), None)
            .await
            .unwrap();
    }

    db.log().clear();
}

fn xs(rows: &[Record]) -> Vec<&str> {
    rows.iter().filter_map(|row| row["x"].as_str()).collect()
}

async fn first_page_counts_total(db: TestDb) {
    let molecule = fixtures::molecule_with(Options {
        total_force: -1,
        ..Options::default()
    });
    db.push(&molecule).await;
    seed(&molecule, &db, 12).await;

    let mut args = value!({ "rowcount": 5 });
    let rows = molecule
        .run_mut(&db.cx(), "m_a", "topics", &mut args, None)
        .await
        .unwrap();

    assert_eq!(xs(&rows), ["x00", "x01", "x02", "x03", "x04"]);
    assert_eq!(args, value!({ "rowcount": 5, "totalno": 12, "maxpageno": 3 }));
    assert!(db.log().has("SELECT COUNT(*)"));
}

async fn later_pages_skip_totals(db: TestDb) {
    let molecule = fixtures::molecule_with(Options {
        total_force: -1,
        ..Options::default()
    });
    db.push(&molecule).await;
    seed(&molecule, &db, 12).await;

    let mut args = value!({ "rowcount": 5, "pageno": 3 });
    let rows = molecule
        .run_mut(&db.cx(), "m_a", "topics", &mut args, None)
        .await
        .unwrap();

    assert_eq!(xs(&rows), ["x10", "x11"]);
    assert_eq!(args, value!({ "rowcount": 5, "pageno": 3 }));
    assert!(!db.log().has("SELECT COUNT(*)"));
}

async fn supplied_total_is_trusted(db: TestDb) {
    let molecule = fixtures::molecule_with(Options {
        total_force: -1,
        ..Options::default()
    });
    db.push(&molecule).await;
    seed(&molecule, &db, 12).await;

    let mut args = value!({ "rowcount": 5, "totalno": 7 });
    molecule
        .run_mut(&db.cx(), "m_a", "topics", &mut args, None)
        .await
        .unwrap();

    assert_eq!(args, value!({ "rowcount": 5, "totalno": 7, "maxpageno": 2 }));
    assert!(!db.log().has("SELECT COUNT(*)"));
}

async fn fixed_total_overrides_count(db: TestDb) {
    let molecule = fixtures::molecule_with(Options {
        total_force: -20,
        ..Options::default()
    });
    db.push(&molecule).await;
    seed(&molecule, &db, 12).await;

    let mut args = value!({ "rowcount": 5 });
    molecule
        .run_mut(&db.cx(), "m_a", "topics", &mut args, None)
        .await
        .unwrap();

    assert_eq!(args, value!({ "rowcount": 5, "totalno": 20, "maxpageno": 4 }));
    assert!(!db.log().has("SELECT COUNT(*)"));
}

async fn totals_off_by_default(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    seed(&molecule, &db, 12).await;

    let mut args = value!({ "rowcount": 5 });
    let rows = molecule
        .run_mut(&db.cx(), "m_a", "topics", &mut args, None)
        .await
        .unwrap();

    assert_len!(rows, 5);
    assert_eq!(args, value!({ "rowcount": 5 }));
}

async fn sort_and_reverse(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    seed(&molecule, &db, 3).await;

    let rows = molecule
        .run(&db.cx(), "m_a", "topics", value!({ "sortby": "x", "sortreverse": 1 }), None)
        .await
        .unwrap();

    assert_eq!(xs(&rows), ["x02", "x01", "x00"]);
}

async fn unsafe_sort_is_dropped(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    seed(&molecule, &db, 12).await;

    let rows = molecule
        .run(
            &db.cx(),
            "m_a",
            "topics",
            value!({ "sortby": "x; DROP TABLE m_a", "rowcount": 5 }),
            None,
        )
        .await
        .unwrap();

    // Ordering and paging are both dropped, the table survives.
    assert_len!(rows, 12);
    assert!(db.log().sql().iter().all(|sql| !sql.contains("DROP")));
}

async fn constraints_filter_rows(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    seed(&molecule, &db, 3).await;

    let rows = molecule
        .run(
            &db.cx(),
            "m_a",
            "topics",
            Record::new(),
            Some(record! { "x" => "x01" }),
        )
        .await
        .unwrap();

    assert_eq!(
        Value::from(rows),
        value!([{ "id": 2, "x": "x01", "y": "y", "z": null }])
    );

    let rows = molecule
        .run(
            &db.cx(),
            "m_a",
            "topics",
            Record::new(),
            Some(record! { "x" => value!(["x00", "x02"]) }),
        )
        .await
        .unwrap();

    assert_eq!(xs(&rows), ["x00", "x02"]);
}

async fn page_past_any_offset_is_empty(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    seed(&molecule, &db, 3).await;

    let pageno = i64::MAX;
    let rows = assert_ok!(
        molecule
            .run(&db.cx(), "m_a", "topics", value!({ "rowcount": 5, "pageno": pageno }), None)
            .await
    );

    assert_empty!(rows);
    assert!(db.log().sql()[0].contains(&format!("LIMIT 5 OFFSET {}", i64::MAX)));
}

tests!(
    first_page_counts_total,
    later_pages_skip_totals,
    supplied_total_is_trusted,
    fixed_total_overrides_count,
    totals_off_by_default,
    sort_and_reverse,
    unsafe_sort_is_dropped,
    constraints_filter_rows,
    page_past_any_offset_is_empty,
);
