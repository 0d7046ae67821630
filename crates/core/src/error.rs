use thiserror::Error;

use crate::Candidate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error("allocator used before init()")]
    NotInitialized,
    #[error("allocator already initialized")]
    AlreadyInitialized,
    #[error("candidate {candidate} is not part of the frontier")]
    InvariantViolation { candidate: Candidate },
    #[error("no approved identifier left to allocate")]
    ExhaustedNamespace,
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
}

pub type Result<T> = std::result::Result<T, AllocError>;
