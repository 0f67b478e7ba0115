//! Fixture builders shared across the integration test suites.

use indexmap::IndexMap;
use relshape_core::{Column, DatabaseStructure, LookupColumnSet, Schema, Table};

pub fn column(name: &str, attnum: i32, type_: &str, mutable: bool) -> Column {
    Column {
        name: name.to_string(),
        attnum,
        r#type: type_.to_string(),
        mutable,
    }
}

pub fn table(name: &str, oid: i64, columns: Vec<Column>, lookup_column_sets: Vec<Vec<&str>>) -> Table {
    let mut map = IndexMap::new();
    for column in columns {
        map.insert(column.name.clone(), column);
    }
    Table {
        name: name.to_string(),
        oid,
        columns: map,
        lookup_column_sets: lookup_column_sets
            .into_iter()
            .map(|names| LookupColumnSet {
                column_names: names.into_iter().map(str::to_string).collect(),
            })
            .collect(),
    }
}

pub fn schema(name: &str, oid: i64, tables: Vec<Table>) -> Schema {
    let mut map = IndexMap::new();
    for table in tables {
        map.insert(table.name.clone(), table);
    }
    Schema {
        name: name.to_string(),
        oid,
        tables: map,
    }
}

pub fn structure(current_schema: &str, schemas: Vec<Schema>) -> DatabaseStructure {
    let mut map = IndexMap::new();
    for schema in schemas {
        map.insert(schema.name.clone(), schema);
    }
    DatabaseStructure {
        schemas: map,
        current_schema: current_schema.to_string(),
    }
}

/// A `public` schema with a single `issues(id int4 pk, title text)` table.
pub fn issues_structure() -> DatabaseStructure {
    let issues = table(
        "issues",
        100,
        vec![column("id", 1, "int4", false), column("title", 2, "text", true)],
        vec![vec!["id"]],
    );
    structure("public", vec![schema("public", 1, vec![issues])])
}

/// A `public` schema with `a(id int4 pk, x text)` and `b(id int4 pk, y text)`.
pub fn join_structure() -> DatabaseStructure {
    let a = table(
        "a",
        200,
        vec![column("id", 1, "int4", false), column("x", 2, "text", true)],
        vec![vec!["id"]],
    );
    let b = table(
        "b",
        201,
        vec![column("id", 1, "int4", false), column("y", 2, "text", true)],
        vec![vec!["id"]],
    );
    structure("public", vec![schema("public", 1, vec![a, b])])
}
