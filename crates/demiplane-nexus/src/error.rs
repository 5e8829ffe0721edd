use thiserror::Error;

/// Failure modes of the registry (spec §4.6 "Failure semantics").
#[derive(Debug, Error)]
pub enum NexusError {
    #[error("no factory or instance registered for this key")]
    NotRegistered,
    #[error("slot is Immortal and cannot be reset")]
    ImmortalSlot,
    #[error("factory failed during construction: {cause}")]
    ConstructionFailed { cause: String },
}

pub type NexusResult<T> = Result<T, NexusError>;
