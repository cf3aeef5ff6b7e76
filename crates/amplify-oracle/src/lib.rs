//! Phase oracles and amplitude amplification.
//!
//! Builds [`amplify_ir::Program`]s that mark one computational-basis
//! state by a sign flip, and the amplification rounds that use them.
//!
//! - [`basis_selector_oracle`]: `|x⟩ → -|x⟩` iff `x` equals a bitstring
//! - [`ControlledSynthesis`] / [`RecursiveControlled`]: ancilla-free
//!   multi-controlled single-qubit operations, injectable into the oracle
//! - [`amplification`]: diffusion, amplification rounds, Grover search
//! - [`SynthesisConfig`]: tolerance and native-gate settings (YAML + env)
//!
//! # Quick start
//!
//! ```rust
//! use amplify_ir::QubitId;
//! use amplify_oracle::basis_selector_oracle;
//!
//! let qubits = QubitId::range(3);
//! let oracle = basis_selector_oracle(&qubits, "101").unwrap();
//!
//! // X on the middle qubit, a doubly-controlled Z, X again.
//! assert_eq!(oracle.instructions().first().unwrap().to_string(), "x q1");
//! assert_eq!(oracle.instructions().last().unwrap().to_string(), "x q1");
//! ```

pub mod amplification;
pub mod config;
pub mod controlled;
pub mod error;
pub mod oracle;

pub use amplification::{
    amplification_program, diffusion_program, diffusion_program_with, grover_program,
    optimal_iterations,
};
pub use config::SynthesisConfig;
pub use controlled::{ControlledProgramBuilder, ControlledSynthesis, RecursiveControlled};
pub use error::{OracleError, OracleResult};
pub use oracle::{basis_selector_oracle, basis_selector_oracle_with, bitstring_index};
