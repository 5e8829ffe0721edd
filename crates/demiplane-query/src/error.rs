use thiserror::Error;

/// Failure modes of query compilation (spec §4.3 "Failure semantics").
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("dialect does not support {0}")]
    UnsupportedFeature(&'static str),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("insert with zero rows in its batch")]
    EmptyBatch,
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}

pub type CompileResult<T> = Result<T, CompileError>;
