//! Error types raised by repository implementations.

use std::path::PathBuf;

use progression_core::PlayerId;
use thiserror::Error;

/// Errors surfaced by profile repositories.
///
/// A missing record is not an error; `load` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("profile repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("player id mismatch: expected {expected}, found {found}")]
    PlayerMismatch { expected: PlayerId, found: PlayerId },

    #[error("data path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
