//! Error types for the macroplan core.

use thiserror::Error;

/// Errors surfaced by macroplan core operations.
///
/// All of these are per-call and recoverable; none is fatal to the
/// process. `MalformedInput` never comes with a partial event list, and
/// `InvalidReport` leaves the caller's running totals untouched.
#[derive(Error, Debug)]
pub enum MacroPlanError {
    #[error("Malformed schedule input: {0}")]
    MalformedInput(String),

    #[error("Invalid macro report: {0}")]
    InvalidReport(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for macroplan core operations.
pub type MacroPlanResult<T> = Result<T, MacroPlanError>;
