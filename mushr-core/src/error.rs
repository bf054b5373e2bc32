//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum MushrCoreError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// The space has an infinite bound and cannot be sampled uniformly.
    #[error("Cannot sample from a space with unbounded dimension {0}")]
    UnboundedSpace(usize),
}
