use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};
use crate::table::{FieldSchema, Table};
use crate::value::{FieldValue, FromFieldValue, IntoFieldValue};

/// One cell in a row: a value plus a reference to its schema (spec §3
/// `Field`).
#[derive(Debug, Clone)]
pub struct Field {
    schema: Arc<FieldSchema>,
    value: FieldValue,
}

impl Field {
    pub fn new(schema: Arc<FieldSchema>, value: FieldValue) -> Self {
        Field { schema, value }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn into_value(self) -> FieldValue {
        self.value
    }

    /// Stores `v` and tags the variant (spec §4.1 `Field::set<T>`).
    pub fn set<T: IntoFieldValue>(&mut self, v: T) {
        self.value = v.into_field_value();
    }

    /// Fails with `TypeMismatch` on wrong-arm access and `NullValue` on
    /// a null field (spec §4.1 `Field::get<T>`).
    pub fn get<T: FromFieldValue>(&self) -> SchemaResult<T> {
        if self.value.is_null() {
            return Err(SchemaError::NullValue(self.schema.name.clone()));
        }
        T::from_field_value(&self.value).ok_or_else(|| SchemaError::TypeMismatch {
            column: self.schema.name.clone(),
            expected: std::any::type_name::<T>(),
            actual: self.value.kind_name(),
        })
    }

    /// Returns `None` on type mismatch or null, never an error (spec
    /// §4.1 `Field::try_get<T>`).
    pub fn try_get<T: FromFieldValue>(&self) -> Option<T> {
        if self.value.is_null() {
            return None;
        }
        T::from_field_value(&self.value)
    }
}

/// One row: a shared reference to its `Table` plus a dense vector of
/// `Field`s in schema declaration order (spec §3 `Record`).
#[derive(Debug, Clone)]
pub struct Record {
    table: Arc<Table>,
    fields: Vec<Field>,
}

impl Record {
    /// Builds an all-null record shaped to `table`'s schema.
    pub fn new(table: Arc<Table>) -> Self {
        let fields = table
            .fields()
            .iter()
            .map(|schema| Field::new(schema.clone(), FieldValue::Null))
            .collect();
        Record { table, fields }
    }

    /// Builds a record from an already-populated field vector, checking
    /// spec §3's invariant that the field count and per-index schema
    /// match the table.
    pub fn from_fields(table: Arc<Table>, fields: Vec<Field>) -> SchemaResult<Self> {
        if fields.len() != table.field_count() {
            return Err(SchemaError::SchemaMismatch {
                table: table.name().to_string(),
                expected: table.field_count(),
                actual: fields.len(),
            });
        }
        for (i, field) in fields.iter().enumerate() {
            if field.schema().name != table.fields()[i].name {
                return Err(SchemaError::SchemaMismatch {
                    table: table.name().to_string(),
                    expected: table.field_count(),
                    actual: fields.len(),
                });
            }
        }
        Ok(Record { table, fields })
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Bounds-checked positional access (spec §4.1 `Record::at`).
    pub fn at(&self, index: usize) -> SchemaResult<&Field> {
        self.fields.get(index).ok_or_else(|| SchemaError::OutOfRange {
            index,
            len: self.fields.len(),
        })
    }

    pub fn at_mut(&mut self, index: usize) -> SchemaResult<&mut Field> {
        let len = self.fields.len();
        self.fields.get_mut(index).ok_or(SchemaError::OutOfRange { index, len })
    }

    /// O(1)-average hash lookup by column name (spec §4.1
    /// `Record::operator[]`).
    pub fn get(&self, name: &str) -> SchemaResult<&Field> {
        let idx = self
            .table
            .column_index(name)
            .ok_or_else(|| SchemaError::KeyNotFound(name.to_string()))?;
        Ok(&self.fields[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> SchemaResult<&mut Field> {
        let idx = self
            .table
            .column_index(name)
            .ok_or_else(|| SchemaError::KeyNotFound(name.to_string()))?;
        Ok(&mut self.fields[idx])
    }

    /// Rejects a non-nullable field left in the null state (spec §3
    /// invariant, enforced before an INSERT is compiled).
    pub fn validate_not_null(&self) -> SchemaResult<()> {
        for field in &self.fields {
            if !field.schema().nullable && field.value().is_null() {
                return Err(SchemaError::NullValue(field.schema().name.clone()));
            }
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Record {
    type Output = Field;
    fn index(&self, index: usize) -> &Field {
        &self.fields[index]
    }
}
