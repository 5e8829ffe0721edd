use demiplane_schema::{FieldValue, FromFieldValue};

use crate::error::{ExecError, ExecResult};

/// A fully materialised result set (spec §4.4 "On success, wrap the
/// result handle in a `ResultBlock`"). Every cell has already been
/// passed through the OID decoder table, so accessors never fail on
/// decoding — only on an out-of-range position or a type mismatch.
#[derive(Debug, Clone, Default)]
pub struct ResultBlock {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<FieldValue>>,
}

impl ResultBlock {
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_name(&self, col: usize) -> ExecResult<&str> {
        self.columns.get(col).map(String::as_str).ok_or(ExecError::ColumnNotFound)
    }

    fn cell(&self, row: usize, col: usize) -> ExecResult<&FieldValue> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(ExecError::ColumnNotFound)
    }

    /// Decodes `(row, col)` as `T`; a SQL `NULL` is a decode failure here —
    /// use [`ResultBlock::get_opt`] when the column may be null.
    pub fn get<T: FromFieldValue>(&self, row: usize, col: usize) -> ExecResult<T> {
        let value = self.cell(row, col)?;
        T::from_field_value(value).ok_or_else(|| ExecError::DecodeError {
            oid: 0,
            reason: format!("column {col} is not a {}", value.kind_name()),
        })
    }

    pub fn get_opt<T: FromFieldValue>(&self, row: usize, col: usize) -> ExecResult<Option<T>> {
        let value = self.cell(row, col)?;
        if value.is_null() {
            return Ok(None);
        }
        T::from_field_value(value)
            .map(Some)
            .ok_or_else(|| ExecError::DecodeError {
                oid: 0,
                reason: format!("column {col} is not a {}", value.kind_name()),
            })
    }
}
