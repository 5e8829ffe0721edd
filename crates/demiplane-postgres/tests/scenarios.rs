use std::sync::Arc;

use demiplane_postgres::PgDialect;
use demiplane_query::{compile_select, compile_update, eq, gt, select, update};
use demiplane_schema::{FieldValue, Table, TableColumn};

fn users_table() -> Arc<Table> {
    let mut t = Table::new("users");
    t.add_field::<i32>("id", "INTEGER");
    t.add_field::<String>("name", "TEXT");
    t.add_field::<i32>("age", "INTEGER");
    t.add_field::<bool>("active", "BOOLEAN");
    Arc::new(t)
}

/// Table `users(id,name,age,active)`, `select(id,name).from(u).where(active
/// == true).order_by(id)` (spec §8 scenario 1). Columns are emitted
/// table-qualified — see DESIGN.md for why that departs from the
/// spec's illustrative unqualified shape.
#[test]
fn scenario_basic_select() {
    let table = users_table();
    let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();
    let name = TableColumn::<String>::new(table.clone(), "name").unwrap();
    let active = TableColumn::<bool>::new(table.clone(), "active").unwrap();

    let query = select(vec![(&id).into(), (&name).into()])
        .from(table)
        .where_(eq(&active, true))
        .order_by((&id).into(), demiplane_query::OrderDirection::Asc);
    let compiled = compile_select(&PgDialect, &query).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT "users"."id", "users"."name" FROM "users" WHERE "users"."active" = $1 ORDER BY "users"."id" ASC"#
    );
    assert_eq!(compiled.packet.0.len(), 1);
    assert_eq!(compiled.packet.0[0].oid, demiplane_postgres::oid::BOOL);
    assert_eq!(compiled.packet.0[0].bytes, Some(vec![1u8]));
}

/// `select(count(*)).from(users).group_by(age)` (spec §8 scenario 2).
#[test]
fn scenario_aggregate_group_by() {
    let table = users_table();
    let age = TableColumn::<i32>::new(table.clone(), "age").unwrap();

    let query = select(vec![demiplane_query::count_star().aliased("n"), (&age).into()])
        .from(table)
        .group_by(vec![(&age).into()]);
    let compiled = compile_select(&PgDialect, &query).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT COUNT(*) AS "n", "users"."age" FROM "users" GROUP BY "users"."age""#
    );
    assert!(compiled.packet.0.is_empty());
}

/// `update(users).set(age, 31).where(id == 2)` (spec §8 scenario 3).
#[test]
fn scenario_update_with_where() {
    let table = users_table();
    let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();

    let query = update(table).set("age", 31_i32).where_(gt(&id, 0_i32));
    let compiled = compile_update(&PgDialect, &query).unwrap();

    assert_eq!(compiled.sql, r#"UPDATE "users" SET "age" = $1 WHERE "users"."id" > $2"#);
    let expected = demiplane_postgres::oid::encode_binary(&FieldValue::I32(31), demiplane_postgres::oid::INT4);
    assert_eq!(compiled.packet.0[0].bytes, Some(expected));
}
