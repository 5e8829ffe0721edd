use thiserror::Error;

/// Errors raised by the schema/record layer (spec §7 "Schema/record").
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown column `{0}`")]
    KeyNotFound(String),

    #[error("index {index} out of range (table has {len} columns)")]
    OutOfRange { index: usize, len: usize },

    #[error("column `{column}` holds a {actual} value, not {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("column `{0}` is null")]
    NullValue(String),

    #[error("record has {actual} fields but table `{table}` expects {expected}")]
    SchemaMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("column `{0}` mismatches its declared Rust type when constructed")]
    ColumnTypeMismatch(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
