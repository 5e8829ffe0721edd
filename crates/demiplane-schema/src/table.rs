use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{SchemaError, SchemaResult};
use crate::value::FieldValue;

/// One column's metadata (spec §3 `FieldSchema`).
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub sql_type: String,
    /// The `TypeId` of the Rust type bound to this column, or `None` if
    /// the column was declared without a static type (the "unset"
    /// `void` arm of spec's invariant).
    pub rust_type: Option<TypeId>,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub indexed: bool,
    pub foreign_key: Option<(String, String)>,
    pub default: Option<FieldValue>,
    pub max_length: Option<usize>,
    pub attributes: HashMap<String, String>,
}

impl FieldSchema {
    fn new(name: impl Into<String>, sql_type: impl Into<String>, rust_type: Option<TypeId>) -> Self {
        FieldSchema {
            name: name.into(),
            sql_type: sql_type.into(),
            rust_type,
            nullable: false,
            primary_key: false,
            unique: false,
            indexed: false,
            foreign_key: None,
            default: None,
            max_length: None,
            attributes: HashMap::new(),
        }
    }
}

/// A named relation: an ordered list of owning [`FieldSchema`]s plus a
/// name→index lookup (spec §3 `Table`, §4.1).
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    fields: Vec<Arc<FieldSchema>>,
    index: FxHashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            fields: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Arc<FieldSchema>] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn field(&self, name: &str) -> SchemaResult<&Arc<FieldSchema>> {
        let idx = self
            .index
            .get(name)
            .ok_or_else(|| SchemaError::KeyNotFound(name.to_string()))?;
        Ok(&self.fields[*idx])
    }

    /// Appends an owning `FieldSchema` whose `rust_type` is `T`'s
    /// type-identity (spec §4.1 `add_field<T>`).
    pub fn add_field<T: 'static>(&mut self, name: impl Into<String>, sql_type: impl Into<String>) -> &mut Self {
        self.add_field_untyped(name, sql_type, Some(TypeId::of::<T>()))
    }

    /// Appends a field with no statically-checked Rust type (the
    /// `void`/unset arm of the invariant in spec §3).
    pub fn add_field_untyped(
        &mut self,
        name: impl Into<String>,
        sql_type: impl Into<String>,
        rust_type: Option<TypeId>,
    ) -> &mut Self {
        let name = name.into();
        let idx = self.fields.len();
        self.fields.push(Arc::new(FieldSchema::new(name.clone(), sql_type, rust_type)));
        self.index.insert(name, idx);
        self
    }

    fn field_mut(&mut self, name: &str) -> SchemaResult<&mut FieldSchema> {
        let idx = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::KeyNotFound(name.to_string()))?;
        Ok(Arc::make_mut(&mut self.fields[idx]))
    }

    pub fn primary_key(&mut self, name: &str) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.primary_key = true;
        Ok(self)
    }

    pub fn nullable(&mut self, name: &str) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.nullable = true;
        Ok(self)
    }

    pub fn unique(&mut self, name: &str) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.unique = true;
        Ok(self)
    }

    pub fn indexed(&mut self, name: &str) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.indexed = true;
        Ok(self)
    }

    pub fn foreign_key(&mut self, name: &str, target_table: impl Into<String>, target_column: impl Into<String>) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.foreign_key = Some((target_table.into(), target_column.into()));
        Ok(self)
    }

    pub fn default_value(&mut self, name: &str, value: FieldValue) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.default = Some(value);
        Ok(self)
    }

    pub fn max_length(&mut self, name: &str, len: usize) -> SchemaResult<&mut Self> {
        self.field_mut(name)?.max_length = Some(len);
        Ok(self)
    }
}
