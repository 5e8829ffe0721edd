use std::path::PathBuf;

use thiserror::Error;

/// Failure modes surfaced by sink construction and I/O. Ring-buffer
/// invariant violations (bad capacity, sequence wraparound) are treated
/// as unrecoverable and panic instead — this enum only covers the
/// recoverable, configuration-time and I/O paths.
#[derive(Debug, Error)]
pub enum ScrollError {
    #[error("invalid sink configuration: {reason}")]
    InvalidSinkConfig { reason: String },
    #[error("ring buffer size {0} is not one of 1024, 8192, 65536, 131072")]
    InvalidRingBufferSize(usize),
    #[error("sink I/O error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

pub type ScrollResult<T> = Result<T, ScrollError>;
