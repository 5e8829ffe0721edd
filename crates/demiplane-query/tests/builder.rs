mod support;

use std::sync::Arc;

use demiplane_query::{compile_delete, compile_insert, compile_select, compile_update, count, eq, gt, select, update};
use demiplane_schema::{FieldValue, Table, TableColumn};
use support::TestDialect;

fn users_table() -> Arc<Table> {
    let mut t = Table::new("users");
    t.add_field::<i32>("id", "INTEGER");
    t.add_field::<String>("name", "TEXT");
    t.add_field::<i32>("age", "INTEGER");
    Arc::new(t)
}

/// `select(id).from(users).where(age > 18)` compiles deterministically to
/// the same SQL shape on every run (spec §13 scenario 1).
#[test]
fn basic_select_with_where_is_deterministic() {
    let table = users_table();
    let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();
    let age = TableColumn::<i32>::new(table.clone(), "age").unwrap();

    let query = select(vec![(&id).into()]).from(table.clone()).where_(gt(&age, 18_i32));
    let compiled = compile_select(&TestDialect, &query).unwrap();

    assert_eq!(compiled.sql, r#"SELECT "users"."id" FROM "users" WHERE "users"."age" > $1"#);
    assert_eq!(compiled.packet.0, vec![FieldValue::I32(18)]);

    let compiled_again = compile_select(&TestDialect, &query).unwrap();
    assert_eq!(compiled.sql, compiled_again.sql);
}

/// `select(count(name)).from(users).group_by(name)` — aggregates are legal
/// in the projection (spec §13 scenario 2).
#[test]
fn aggregate_with_group_by() {
    let table = users_table();
    let name = TableColumn::<String>::new(table.clone(), "name").unwrap();

    let query = select(vec![count(&name).aliased("n"), (&name).into()])
        .from(table)
        .group_by(vec![(&name).into()]);
    let compiled = compile_select(&TestDialect, &query).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT COUNT("users"."name") AS "n", "users"."name" FROM "users" GROUP BY "users"."name""#
    );
}

/// Aggregates are rejected from `WHERE` (spec §4.2 `IsWhereExpression`).
#[test]
fn aggregate_in_where_is_rejected() {
    let table = users_table();
    let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();

    let query = select(vec![(&id).into()])
        .from(table.clone())
        .where_(gt(count(&id), 0_i32));
    let err = compile_select(&TestDialect, &query).unwrap_err();
    assert!(matches!(err, demiplane_query::CompileError::UnsupportedFeature(_)));
}

/// `update(users).set(name, "x").where(id = 1)` (spec §13 scenario 3).
#[test]
fn update_with_where() {
    let table = users_table();
    let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();

    let query = update(table).set("name", "renamed").where_(eq(&id, 1_i32));
    let compiled = compile_update(&TestDialect, &query).unwrap();

    assert_eq!(compiled.sql, r#"UPDATE "users" SET "name" = $1 WHERE "users"."id" = $2"#);
}

#[test]
fn insert_with_empty_batch_fails() {
    let table = users_table();
    let query = demiplane_query::insert_into(table)
        .into(vec!["id", "name"])
        .batch(vec![]);
    let err = compile_insert(&TestDialect, &query).unwrap_err();
    assert!(matches!(err, demiplane_query::CompileError::EmptyBatch));
}

#[test]
fn insert_row_shape_mismatch_fails() {
    let table = users_table();
    let query = demiplane_query::insert_into(table)
        .into(vec!["id", "name"])
        .values(vec![FieldValue::I32(1)]);
    let err = compile_insert(&TestDialect, &query).unwrap_err();
    assert!(matches!(err, demiplane_query::CompileError::ShapeMismatch(_)));
}

#[test]
fn delete_with_where() {
    let table = users_table();
    let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();
    let query = demiplane_query::delete_from(table).where_(eq(&id, 1_i32));
    let compiled = compile_delete(&TestDialect, &query).unwrap();
    assert_eq!(compiled.sql, r#"DELETE FROM "users" WHERE "users"."id" = $1"#);
}
