//! Error types for the oracle crate.

use thiserror::Error;

/// Errors produced while building oracles and controlled operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// Caller-supplied arguments violate a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation handed to the controlled builder is not unitary.
    #[error("Operation '{gate_name}' is not unitary within tolerance {tolerance}")]
    NonUnitary {
        /// Name the operation was tagged with.
        gate_name: String,
        /// Tolerance used for the check.
        tolerance: f64,
    },

    /// Synthesis configuration could not be read or is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Program builder returned an error.
    #[error("Program IR error: {0}")]
    Ir(#[from] amplify_ir::IrError),
}

/// Result type for oracle construction.
pub type OracleResult<T> = Result<T, OracleError>;
