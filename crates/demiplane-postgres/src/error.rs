use thiserror::Error;

use demiplane_gears::Located;

/// Failure modes of the executor and its binary codec (spec §4.4, §7
/// "Execution").
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("connection closed")]
    ConnectionClosed,
    #[error("protocol error: {0}")]
    ProtocolError(Located<String>),
    #[error("server error [{sqlstate}]: {message}")]
    ServerError { sqlstate: String, message: String },
    #[error("failed to decode OID {oid}: {reason}")]
    DecodeError { oid: u32, reason: String },
    #[error("no column at the requested position")]
    ColumnNotFound,
}

pub type ExecResult<T> = Result<T, ExecError>;

impl From<tokio_postgres::Error> for ExecError {
    #[track_caller]
    fn from(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            return ExecError::ConnectionClosed;
        }
        if let Some(db_err) = err.as_db_error() {
            return ExecError::ServerError {
                sqlstate: db_err.code().code().to_string(),
                message: db_err.message().to_string(),
            };
        }
        ExecError::ProtocolError(Located::new(err.to_string()))
    }
}
