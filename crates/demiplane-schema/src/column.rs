use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::table::{FieldSchema, Table};

/// A shared handle to a table's name, cheaply cloned into every column
/// reference that needs to know which table it belongs to.
pub type TableHandle = Arc<Table>;

/// A typed reference to one column of one table (spec §3 `TableColumn<T>`).
///
/// `schema` is a non-owning pointer into the table's own field list
/// (`Arc<FieldSchema>`, sharing storage with `Table::fields()`); `table`
/// keeps the owning table alive and gives compiled SQL access to the
/// table name. The invariant checked in [`TableColumn::new`] is spec
/// §3's "every `TableColumn<T>`'s `FieldSchema::rust_type` either
/// equals `T`'s type-identity or is unset."
pub struct TableColumn<T> {
    pub table: TableHandle,
    pub schema: Arc<FieldSchema>,
    pub alias: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for TableColumn<T> {
    fn clone(&self) -> Self {
        TableColumn {
            table: self.table.clone(),
            schema: self.schema.clone(),
            alias: self.alias.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> TableColumn<T> {
    /// Builds a typed column handle for `name` on `table`.
    ///
    /// Returns `None` if the column doesn't exist or its declared
    /// `rust_type` is set and disagrees with `T` — the Rust analogue of
    /// the compile-time rejection spec §3 describes; since our `Table`
    /// is built at runtime from a schema description, the check is a
    /// cheap runtime assertion made once when callers construct their
    /// typed column set (see `demiplane-schema::Entity` derive).
    pub fn new(table: TableHandle, name: &str) -> Option<Self> {
        let idx = table.column_index(name)?;
        let schema = table.fields()[idx].clone();
        match schema.rust_type {
            Some(tid) if tid != TypeId::of::<T>() => return None,
            _ => {}
        }
        Some(TableColumn {
            table,
            schema,
            alias: None,
            _marker: PhantomData,
        })
    }

    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }
}

/// An untyped column reference carrying name + table context (spec §3
/// `DynamicColumn`); used where the compiler needs a column handle
/// without the `TableColumn<T>` type parameter, e.g. building a
/// `GROUP BY` list generically.
#[derive(Clone)]
pub struct DynamicColumn {
    pub table: TableHandle,
    pub name: String,
}

impl DynamicColumn {
    pub fn new(table: TableHandle, name: impl Into<String>) -> Self {
        DynamicColumn {
            table,
            name: name.into(),
        }
    }
}

impl<T> From<&TableColumn<T>> for DynamicColumn {
    fn from(col: &TableColumn<T>) -> Self {
        DynamicColumn {
            table: col.table.clone(),
            name: col.schema.name.clone(),
        }
    }
}

/// The `table.*` selector (spec §3 `AllColumns`).
#[derive(Clone)]
pub struct AllColumns {
    pub table: TableHandle,
}

impl AllColumns {
    pub fn new(table: TableHandle) -> Self {
        AllColumns { table }
    }
}
