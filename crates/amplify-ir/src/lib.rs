//! Amplify Program Intermediate Representation
//!
//! Value types for gate-level quantum programs: qubit handles, gates,
//! instructions and the append-only [`Program`] that oracles and
//! amplification routines are assembled into.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], an opaque register-line handle
//! - **Gates**: [`StandardGate`] for built-in gates (H, X, Z, CZ, ...) and
//!   [`CustomGate`] for named gates carrying their own matrix
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Program**: [`Program`], an ordered instruction sequence composed by
//!   concatenation
//! - **Matrices**: [`Unitary2x2`] for single-qubit operations, and the
//!   [`unitary`] module for dense evaluation of small programs
//!
//! # Example: Controlled-Z Between Bit Flips
//!
//! ```rust
//! use amplify_ir::{Program, QubitId};
//! use amplify_ir::unitary::unitary;
//!
//! let q = QubitId::range(2);
//! let mut program = Program::new();
//! program.x(q[1]).unwrap().cz(q[0], q[1]).unwrap().x(q[1]).unwrap();
//!
//! // Only |10⟩ picks up a sign.
//! let u = unitary(&program, &q).unwrap();
//! assert!(u[[2, 2]].re < 0.0);
//! assert!(u[[3, 3]].re > 0.0);
//! ```

pub mod error;
pub mod gate;
pub mod instruction;
pub mod matrix;
pub mod program;
pub mod qubit;
pub mod unitary;

pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::Instruction;
pub use matrix::Unitary2x2;
pub use program::Program;
pub use qubit::QubitId;
