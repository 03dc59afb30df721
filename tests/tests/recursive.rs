use tests::*;

use molecule::{record, Options, Record, Value};
use pretty_assertions::assert_eq;

fn roots() -> Option<Record> {
    Some(record! { "parent_id" => Value::Null })
}

async fn tree_insert_flattens_descendants(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    let rows = molecule
        .run(
            &cx,
            "category",
            "insert",
            value!({
                "name": "root",
                "children": [
                    { "name": "a", "children": [{ "name": "a1" }] },
                    { "name": "b" },
                ],
            }),
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        Value::from(rows),
        value!([{
            "name": "root",
            "category_id": 1,
            "children": [
                { "name": "a", "category_id": 2 },
                { "name": "a1", "category_id": 4 },
                { "name": "b", "category_id": 3 },
            ],
        }])
    );

    let rows = molecule
        .run(&cx, "category", "topics", Record::new(), roots())
        .await
        .unwrap();

    assert_eq!(
        Value::from(rows),
        value!([{
            "category_id": 1,
            "parent_id": null,
            "name": "root",
            "children": [
                { "category_id": 2, "name": "a" },
                { "category_id": 4, "name": "a1" },
                { "category_id": 3, "name": "b" },
            ],
        }])
    );
}

async fn prepare_into_tree_walks_nested_input(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    let rows = molecule
        .run(
            &cx,
            "book",
            "insert",
            value!({
                "title": "Dune",
                "shelf": {
                    "name": "fiction",
                    "children": [{ "name": "scifi", "children": [{ "name": "space opera" }] }],
                },
            }),
            None,
        )
        .await
        .unwrap();

    assert_eq!(Value::from(rows), value!([{ "title": "Dune", "book_id": 1 }]));

    let rows = molecule
        .run(&cx, "category", "topics", Record::new(), roots())
        .await
        .unwrap();

    assert_eq!(
        Value::from(rows),
        value!([{
            "category_id": 1,
            "parent_id": null,
            "name": "fiction",
            "children": [
                { "category_id": 2, "name": "scifi" },
                { "category_id": 3, "name": "space opera" },
            ],
        }])
    );
}

async fn descent_ends_where_nextpages_leave_the_tree(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;
    let cx = db.cx();

    let rows = assert_ok!(
        molecule
            .run(
                &cx,
                "book",
                "shelve",
                value!({
                    "title": "Emma",
                    "shelf": {
                        "name": "classics",
                        "children": [{ "name": "regency" }],
                        "books": [{ "title": "Persuasion" }],
                    },
                }),
                None,
            )
            .await
    );

    assert_eq!(Value::from(rows), value!([{ "title": "Emma", "book_id": 1 }]));

    // Nothing below the shelf is written: no nextpage of `file` leads back
    // into the tree.
    assert_eq!(db.log().count("INSERT INTO \"category\""), 1);
    assert_eq!(db.log().count("INSERT INTO \"book\""), 1);

    let rows = assert_ok!(
        molecule
            .run(&cx, "category", "topics", Record::new(), roots())
            .await
    );

    assert_eq!(
        Value::from(rows),
        value!([{ "category_id": 1, "parent_id": null, "name": "classics" }])
    );
}

async fn flat_table_does_not_descend(db: TestDb) {
    let molecule = fixtures::molecule();
    db.push(&molecule).await;

    let rows = assert_ok!(
        molecule
            .run(
                &db.cx(),
                "book",
                "shelve",
                value!({
                    "title": "Emma",
                    "shelf": {
                        "name": "classics",
                        "tag": { "text": "gift", "genres": [{ "name": "regency" }] },
                    },
                }),
                None,
            )
            .await
    );

    assert_eq!(Value::from(rows), value!([{ "title": "Emma", "book_id": 1 }]));

    // `tag` runs inside the tree walk but has no parent pointer, so its
    // connection into `category` is not followed.
    assert_eq!(db.log().count("INSERT INTO \"tag\""), 1);
    assert_eq!(db.log().count("INSERT INTO \"category\""), 1);
}

async fn depth_limit_stops_runaway_trees(db: TestDb) {
    let molecule = fixtures::molecule_with(Options {
        max_depth: 1,
        ..Options::default()
    });
    db.push(&molecule).await;

    assert_err!(
        molecule
            .run(
                &db.cx(),
                "category",
                "insert",
                value!({
                    "name": "root",
                    "children": [{ "name": "a", "children": [{ "name": "a1" }] }],
                }),
                None,
            )
            .await,
        is_recursion_limit
    );
}

tests!(
    tree_insert_flattens_descendants,
    prepare_into_tree_walks_nested_input,
    descent_ends_where_nextpages_leave_the_tree,
    flat_table_does_not_descend,
    depth_limit_stops_runaway_trees,
);
