//! Atoms shared by the integration tests.
//!
//! `m_a` is a parent table with a two-column unique key, `m_b` holds its
//! children, `category` is a self-referencing tree, `book` files books
//! under categories and `tag` is a flat table that links back into the tree.

use molecule::{
    action::{Stmt, Topics},
    Action, ActionKind, Atom, Column, Connection, ForeignKey, Molecule, Options, Relate, Shape,
    Table, Type,
};

pub fn m_a_table() -> Table {
    Table::new("m_a")
        .column(Column::new("id", Type::I64).auto())
        .column(Column::new("x", Type::String).not_null())
        .column(Column::new("y", Type::String).not_null())
        .column(Column::new("z", Type::String))
        .primary_key(["id"])
        .id_auto("id")
        .unique(["x", "y"])
}

pub fn m_b_table() -> Table {
    Table::new("m_b")
        .column(Column::new("tid", Type::I64).auto())
        .column(Column::new("id", Type::I64))
        .column(Column::new("child", Type::String))
        .primary_key(["tid"])
        .id_auto("tid")
        .foreign_key(ForeignKey::new("id", "m_a", "id"))
}

/// Passes `id` of the parent row on as `id`.
fn by_id() -> Relate {
    Relate::new().field("id", "id")
}

fn insert_children() -> Connection {
    Connection::new("m_b", "insert")
        .args(by_id())
        .with_marker("m_b")
}

fn list_children() -> Connection {
    Connection::new("m_b", "topics")
        .extra(by_id())
        .with_marker("m_b")
}

pub fn m_a() -> Atom {
    Atom::new(m_a_table())
        .action(Action::insert().nextpage(insert_children()))
        .action(Action::upsert().nextpage(insert_children()))
        .action(Action::update())
        .action(Action::edit().nextpage(list_children()))
        .action(Action::topics().nextpage(list_children()))
        .action(
            Action::new("summary", ActionKind::Topics(Topics::default()))
                .nextpage(
                    Connection::new("m_b", "names")
                        .extra(by_id())
                        .shape(Shape::Single)
                        .with_marker("first_child"),
                )
                .nextpage(
                    Connection::new("m_b", "by_child")
                        .extra(by_id())
                        .shape(Shape::Grouped)
                        .with_marker("by_child"),
                )
                .nextpage(
                    Connection::new("m_b", "by_child")
                        .extra(by_id())
                        .shape(Shape::Map)
                        .with_marker("child_ids"),
                ),
        )
        .action(
            Action::delete().prepare(Connection::new("m_a", "delecs").args(by_id())),
        )
        .action(
            Action::delecs().nextpage(
                Connection::new("m_b", "delete")
                    .args(by_id())
                    .extra(by_id()),
            ),
        )
        .action(
            // Deletes the children through their own cascade preparation.
            Action::new("purge", ActionKind::Delete).prepare(
                Connection::new("m_b", "delecs")
                    .args(by_id())
                    .extra(by_id()),
            ),
        )
}

pub fn m_b() -> Atom {
    Atom::new(m_b_table())
        .action(Action::insert())
        .action(Action::upsert())
        .action(Action::topics())
        .action(Action::delete())
        .action(Action::delecs().nextpage(
            Connection::new("m_b", "delete").args(Relate::new().field("tid", "tid")),
        ))
        .action(Action::new("names", ActionKind::Topics(Topics::default())).picked(["child"]))
        .action(Action::new(
            "by_child",
            ActionKind::Stmt(
                Stmt::new("SELECT child, tid FROM m_b WHERE id = ?1 ORDER BY tid")
                    .param("id")
                    .column(Column::new("child", Type::String))
                    .column(Column::new("tid", Type::I64)),
            ),
        ))
        .action(
            // Insert a child under a parent found, or created, by its unique key.
            Action::new("adopt", ActionKind::Insert).prepare(
                Connection::new("m_a", "insupd")
                    .args(Relate::new().field("x", "x").field("y", "y")),
            ),
        )
        .action(
            // Insert the same child under every parent matching `y`.
            Action::new("enroll", ActionKind::Insert).prepare(
                Connection::new("m_a", "topics").extra(Relate::new().field("y", "y")),
            ),
        )
}

pub fn category_table() -> Table {
    Table::new("category")
        .column(Column::new("category_id", Type::I64).auto().recursive())
        .column(Column::new("parent_id", Type::I64).recursive())
        .column(Column::new("title", Type::String).with_label("name"))
        .primary_key(["category_id"])
        .id_auto("category_id")
}

pub fn category() -> Atom {
    Atom::new(category_table())
        .action(
            Action::insert().nextpage(
                Connection::new("category", "insert")
                    .args(Relate::new().field("category_id", "parent_id"))
                    .with_marker("children"),
            ),
        )
        .action(
            Action::topics().nextpage(
                Connection::new("category", "topics")
                    .extra(Relate::new().field("category_id", "parent_id"))
                    .with_marker("children"),
            ),
        )
        .action(
            // A tree write whose only nextpage leaves the tree.
            Action::new("file", ActionKind::Insert)
                .prepare(Connection::new("tag", "insert").with_marker("tag"))
                .nextpage(Connection::new("book", "insert").with_marker("books")),
        )
}

pub fn book() -> Atom {
    Atom::new(
        Table::new("book")
            .column(Column::new("book_id", Type::I64).auto())
            .column(Column::new("title", Type::String))
            .primary_key(["book_id"])
            .id_auto("book_id"),
    )
    .action(
        Action::insert().prepare(Connection::new("category", "insert").with_marker("shelf")),
    )
    .action(
        Action::new("shelve", ActionKind::Insert)
            .prepare(Connection::new("category", "file").with_marker("shelf")),
    )
}

pub fn tag() -> Atom {
    Atom::new(
        Table::new("tag")
            .column(Column::new("tag_id", Type::I64).auto())
            .column(Column::new("text", Type::String))
            .primary_key(["tag_id"])
            .id_auto("tag_id"),
    )
    .action(
        Action::insert().nextpage(
            Connection::new("category", "insert").with_marker("genres"),
        ),
    )
}

pub fn molecule() -> Molecule {
    molecule_with(Options::default())
}

pub fn molecule_with(options: Options) -> Molecule {
    Molecule::builder()
        .atom(m_a())
        .atom(m_b())
        .atom(category())
        .atom(book())
        .atom(tag())
        .options(options)
        .build()
        .unwrap()
}
