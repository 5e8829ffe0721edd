use demiplane_schema::{FieldValue, TableHandle};

use crate::error::{CompileError, CompileResult};

/// `insert_into(table).into({col_names}).values({field_values})` /
/// `.batch(records)` (spec §4.2). Zero rows in the batch is a compile
/// failure, checked once compilation is requested rather than eagerly on
/// every `.values()` call, so builders can be assembled incrementally.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    pub(crate) table: TableHandle,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<FieldValue>>,
    pub(crate) returning: bool,
}

pub fn insert_into(table: TableHandle) -> InsertBuilder {
    InsertBuilder { table, columns: Vec::new() }
}

pub struct InsertBuilder {
    table: TableHandle,
    columns: Vec<String>,
}

impl InsertBuilder {
    pub fn into(mut self, columns: Vec<impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn values(self, row: Vec<FieldValue>) -> InsertQuery {
        InsertQuery {
            table: self.table,
            columns: self.columns,
            rows: vec![row],
            returning: false,
        }
    }

    pub fn batch(self, rows: Vec<Vec<FieldValue>>) -> InsertQuery {
        InsertQuery {
            table: self.table,
            columns: self.columns,
            rows,
            returning: false,
        }
    }
}

impl InsertQuery {
    pub fn returning(mut self) -> Self {
        self.returning = true;
        self
    }

    pub(crate) fn validate(&self) -> CompileResult<()> {
        if self.rows.is_empty() {
            return Err(CompileError::EmptyBatch);
        }
        for row in &self.rows {
            if row.len() != self.columns.len() {
                return Err(CompileError::ShapeMismatch(format!(
                    "row has {} values but {} columns were declared",
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }
}
