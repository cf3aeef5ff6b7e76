//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::matrix::Unitary2x2;

/// Suffix marking the adjoint of a named custom gate.
pub const INVERSE_SUFFIX: &str = "-INV";

/// Widest custom matrix gate.
pub const MAX_CUSTOM_GATE_QUBITS: u32 = 10;

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    /// Phase gate P(λ) = diag(1, e^{iλ}).
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ => 2,
            _ => 1,
        }
    }

    /// The 2x2 matrix of a single-qubit gate, `None` for two-qubit gates.
    pub fn unitary_2x2(&self) -> Option<Unitary2x2> {
        let u = match self {
            StandardGate::I => Unitary2x2::identity(),
            StandardGate::X => Unitary2x2::x(),
            StandardGate::Y => Unitary2x2::y(),
            StandardGate::Z => Unitary2x2::z(),
            StandardGate::H => Unitary2x2::h(),
            StandardGate::S => Unitary2x2::s(),
            StandardGate::Sdg => Unitary2x2::sdg(),
            StandardGate::T => Unitary2x2::t(),
            StandardGate::Tdg => Unitary2x2::tdg(),
            StandardGate::P(lambda) => Unitary2x2::p(*lambda),
            StandardGate::CX | StandardGate::CZ => return None,
        };
        Some(u)
    }

    /// Row-major matrix; the first operand is the most significant bit.
    pub fn matrix(&self) -> Vec<Complex64> {
        match self {
            StandardGate::CX => Unitary2x2::x().controlled(),
            StandardGate::CZ => Unitary2x2::z().controlled(),
            single => single
                .unitary_2x2()
                .map(|u| u.to_vec())
                .unwrap_or_default(),
        }
    }

    /// The adjoint gate.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::P(lambda) => StandardGate::P(-lambda),
            other => *other,
        }
    }

    /// The fixed single-qubit gate matching `u` element-wise, if any.
    ///
    /// Only parameter-free gates are considered; global phase is not
    /// factored out.
    pub fn matching_single_qubit(u: &Unitary2x2, tolerance: f64) -> Option<StandardGate> {
        [
            StandardGate::I,
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Sdg,
            StandardGate::T,
            StandardGate::Tdg,
        ]
        .into_iter()
        .find(|g| {
            g.unitary_2x2()
                .is_some_and(|m| m.approx_eq(u, tolerance))
        })
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A named gate carrying its own matrix.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }
}

/// A named gate defined by its unitary matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Unitary matrix (row-major, 2^n × 2^n).
    pub matrix: Vec<Complex64>,
}

impl CustomGate {
    /// Create a new custom gate, checking the arity and matrix size.
    pub fn new(name: impl Into<String>, num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        let gate = Self {
            name: name.into(),
            num_qubits,
            matrix,
        };
        gate.validate()?;
        Ok(gate)
    }

    /// Check that the arity is supported and the matrix is `2^n × 2^n`.
    ///
    /// The fields are public, so gates built by hand are checked again
    /// when an instruction carrying them enters a program.
    pub fn validate(&self) -> IrResult<()> {
        if self.num_qubits > MAX_CUSTOM_GATE_QUBITS {
            return Err(IrError::GateTooLarge {
                gate_name: self.name.clone(),
                num_qubits: self.num_qubits,
                max: MAX_CUSTOM_GATE_QUBITS,
            });
        }
        let dim = self.dim();
        if self.matrix.len() != dim * dim {
            return Err(IrError::InvalidMatrix {
                gate_name: self.name.clone(),
                expected: dim * dim,
                got: self.matrix.len(),
            });
        }
        Ok(())
    }

    /// Single-qubit gate from a 2x2 matrix.
    pub fn single_qubit(name: impl Into<String>, u: &Unitary2x2) -> Self {
        Self {
            name: name.into(),
            num_qubits: 1,
            matrix: u.to_vec(),
        }
    }

    /// Two-qubit `|0⟩⟨0| ⊗ I + |1⟩⟨1| ⊗ U` acting on `[control, target]`.
    pub fn controlled(name: impl Into<String>, u: &Unitary2x2) -> Self {
        Self {
            name: name.into(),
            num_qubits: 2,
            matrix: u.controlled(),
        }
    }

    /// Dimension of the matrix, `2^num_qubits`.
    ///
    /// # Panics
    ///
    /// If `num_qubits` is at least `usize::BITS`. Validated gates never are.
    pub fn dim(&self) -> usize {
        1usize << self.num_qubits
    }

    /// Conjugate-transposed gate; the name toggles the `-INV` suffix.
    pub fn inverse(&self) -> Self {
        let dim = self.dim();
        let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
        for row in 0..dim {
            for col in 0..dim {
                matrix[col * dim + row] = self.matrix[row * dim + col].conj();
            }
        }
        let name = match self.name.strip_suffix(INVERSE_SUFFIX) {
            Some(base) => base.to_string(),
            None => format!("{}{INVERSE_SUFFIX}", self.name),
        };
        Self {
            name,
            num_qubits: self.num_qubits,
            matrix,
        }
    }
}

/// A gate with an optional label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Row-major matrix of the gate.
    pub fn matrix(&self) -> Vec<Complex64> {
        match &self.kind {
            GateKind::Standard(g) => g.matrix(),
            GateKind::Custom(g) => g.matrix.clone(),
        }
    }

    /// The adjoint gate. Labels are dropped.
    pub fn inverse(&self) -> Self {
        match &self.kind {
            GateKind::Standard(g) => Gate::standard(g.inverse()),
            GateKind::Custom(g) => Gate::custom(g.inverse()),
        }
    }

    /// Get the custom definition if this is a custom gate.
    pub fn as_custom(&self) -> Option<&CustomGate> {
        match &self.kind {
            GateKind::Custom(g) => Some(g),
            GateKind::Standard(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
