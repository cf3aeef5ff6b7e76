//! Program instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::QubitId;

/// A gate applied to an ordered list of qubits.
///
/// The first operand is the most significant bit of the gate's local
/// matrix index, so for controlled gates the controls come first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Check custom gate matrices, operand count and operand uniqueness.
    pub fn validate(&self) -> IrResult<()> {
        if let Some(custom) = self.gate.as_custom() {
            custom.validate()?;
        }
        let expected = self.gate.num_qubits();
        let got = u32::try_from(self.qubits.len()).unwrap_or(u32::MAX);
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name().to_string(),
                expected,
                got,
            });
        }
        for (i, q) in self.qubits.iter().enumerate() {
            if self.qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(self.name().to_string()),
                });
            }
        }
        Ok(())
    }

    /// The adjoint instruction on the same operands.
    pub fn inverse(&self) -> Self {
        Self {
            gate: self.gate.inverse(),
            qubits: self.qubits.clone(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for q in &self.qubits {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::CustomGate;
    use crate::matrix::Unitary2x2;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert!(inst.validate().is_ok());
    }

    #[test]
    fn test_display() {
        let inst = Instruction::two_qubit_gate(StandardGate::CZ, QubitId(0), QubitId(3));
        assert_eq!(inst.to_string(), "cz q0 q3");
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let inst = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(
            inst.validate(),
            Err(IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_operand_rejected() {
        let gate = CustomGate::controlled("C-Z", &Unitary2x2::z());
        let inst = Instruction::gate(gate, [QubitId(2), QubitId(2)]);
        assert!(matches!(
            inst.validate(),
            Err(IrError::DuplicateQubit {
                qubit: QubitId(2),
                ..
            })
        ));
    }

    #[test]
    fn test_hand_built_custom_gate_checked() {
        let gate = CustomGate {
            name: "short".into(),
            num_qubits: 2,
            matrix: vec![num_complex::Complex64::new(1.0, 0.0); 4],
        };
        let inst = Instruction::gate(gate, [QubitId(0), QubitId(1)]);
        assert!(matches!(
            inst.validate(),
            Err(IrError::InvalidMatrix {
                expected: 16,
                got: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_inverse_keeps_operands() {
        let inst = Instruction::single_qubit_gate(StandardGate::T, QubitId(4));
        let inv = inst.inverse();
        assert_eq!(inv.name(), "tdg");
        assert_eq!(inv.qubits, vec![QubitId(4)]);
    }
}
