//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in the register an operation was evaluated against.
    #[error("Qubit {qubit} not found in register{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Custom gate matrix has the wrong number of entries.
    #[error("Gate '{gate_name}' matrix has {got} entries, expected {expected}")]
    InvalidMatrix {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of entries, `(2^n)^2`.
        expected: usize,
        /// Actual number of entries.
        got: usize,
    },

    /// Custom gate acts on more qubits than a matrix gate may.
    #[error("Gate '{gate_name}' acts on {num_qubits} qubits, at most {max} allowed")]
    GateTooLarge {
        /// Name of the gate.
        gate_name: String,
        /// Declared number of qubits.
        num_qubits: u32,
        /// Largest supported arity.
        max: u32,
    },

    /// State vector length does not match the register.
    #[error("State vector has {got} amplitudes, register needs {expected}")]
    StateDimensionMismatch {
        /// `2^n` for an `n`-qubit register.
        expected: usize,
        /// Length of the supplied state.
        got: usize,
    },

    /// Basis index outside the register's state space.
    #[error("Basis index {index} out of range for dimension {dim}")]
    BasisIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// State-space dimension.
        dim: usize,
    },

    /// Register too wide for dense evaluation.
    #[error("Register of {size} qubits exceeds the dense evaluation limit of {max}")]
    RegisterTooLarge {
        /// Requested register width.
        size: usize,
        /// Largest supported width.
        max: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
