//! Append-only gate programs.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, Gate, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// An ordered sequence of gate instructions.
///
/// Programs are values: they are built by appending instructions and
/// composed by concatenation. Every instruction is validated on entry,
/// so a `Program` never holds a gate applied to the wrong number of
/// qubits or to the same qubit twice. Deserialization goes through the
/// same checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SerializedProgram")]
pub struct Program {
    instructions: Vec<Instruction>,
}

/// Wire shape of a [`Program`] before validation.
#[derive(Deserialize)]
struct SerializedProgram {
    instructions: Vec<Instruction>,
}

impl TryFrom<SerializedProgram> for Program {
    type Error = IrError;

    fn try_from(raw: SerializedProgram) -> IrResult<Self> {
        Self::from_instructions(raw.instructions)
    }
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program from instructions, validating each one.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> IrResult<Self> {
        let mut program = Self::new();
        for inst in instructions {
            program.push(inst)?;
        }
        Ok(program)
    }

    /// Append one instruction.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate()?;
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::P(lambda), qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append every instruction of `other`.
    pub fn extend(&mut self, other: &Program) -> &mut Self {
        self.instructions.extend(other.instructions.iter().cloned());
        self
    }

    /// The inverse program: instructions reversed, each replaced by its adjoint.
    pub fn dagger(&self) -> Program {
        Program {
            instructions: self
                .instructions
                .iter()
                .rev()
                .map(Instruction::inverse)
                .collect(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over instructions.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Every qubit touched, in ascending order.
    pub fn qubits(&self) -> Vec<QubitId> {
        self.instructions
            .iter()
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Custom gate definitions used, first occurrence per name.
    pub fn defined_gates(&self) -> Vec<&CustomGate> {
        let mut seen = FxHashSet::default();
        self.instructions
            .iter()
            .filter_map(|inst| inst.gate.as_custom())
            .filter(|g| seen.insert(g.name.as_str()))
            .collect()
    }

    /// Number of instructions per gate name.
    pub fn gate_counts(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl AddAssign<&Program> for Program {
    fn add_assign(&mut self, rhs: &Program) {
        self.extend(rhs);
    }
}

impl AddAssign<Program> for Program {
    fn add_assign(&mut self, rhs: Program) {
        self.instructions.extend(rhs.instructions);
    }
}

impl Add<Program> for Program {
    type Output = Program;

    fn add(mut self, rhs: Program) -> Program {
        self += rhs;
        self
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.instructions {
            writeln!(f, "{inst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Unitary2x2;
    use num_complex::Complex64;

    #[test]
    fn test_new_program() {
        let program = Program::new();
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert!(program.qubits().is_empty());
    }

    #[test]
    fn test_fluent_api() {
        let mut program = Program::new();
        program
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .z(QubitId(1))
            .unwrap();

        assert_eq!(program.len(), 3);
        assert_eq!(program.qubits(), vec![QubitId(0), QubitId(1)]);
        assert_eq!(program.to_string(), "h q0\ncx q0 q1\nz q1\n");
    }

    #[test]
    fn test_invalid_instruction_not_appended() {
        let mut program = Program::new();
        let err = program.cz(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
        assert!(program.is_empty());
    }

    #[test]
    fn test_concatenation() {
        let mut a = Program::new();
        a.x(QubitId(0)).unwrap();
        let mut b = Program::new();
        b.z(QubitId(1)).unwrap();

        let joined = a.clone() + b.clone();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.instructions()[1].name(), "z");

        a += &b;
        assert_eq!(a, joined);
    }

    #[test]
    fn test_dagger_reverses_and_inverts() {
        let mut program = Program::new();
        program.s(QubitId(0)).unwrap().t(QubitId(1)).unwrap();

        let inverse = program.dagger();
        let names: Vec<_> = inverse.iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["tdg", "sdg"]);
        assert_eq!(inverse.instructions()[0].qubits, vec![QubitId(1)]);
    }

    #[test]
    fn test_defined_gates_deduplicated() {
        let cs = CustomGate::controlled("C-SQRT-Z", &Unitary2x2::s());
        let mut program = Program::new();
        program
            .gate(cs.clone(), [QubitId(0), QubitId(2)])
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .gate(cs.inverse(), [QubitId(1), QubitId(2)])
            .unwrap()
            .gate(cs, [QubitId(1), QubitId(2)])
            .unwrap();

        let names: Vec<_> = program
            .defined_gates()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["C-SQRT-Z", "C-SQRT-Z-INV"]);

        let counts = program.gate_counts();
        assert_eq!(counts["C-SQRT-Z"], 2);
        assert_eq!(counts["cx"], 1);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut program = Program::new();
        program
            .x(QubitId(1))
            .unwrap()
            .gate(CustomGate::controlled("C-Z", &Unitary2x2::z()), [QubitId(0), QubitId(1)])
            .unwrap();

        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn test_from_instructions_validates() {
        let program = Program::from_instructions([
            Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
        ])
        .unwrap();
        assert_eq!(program.to_string(), "h q0\ncx q0 q1\n");

        let err = Program::from_instructions([Instruction::gate(StandardGate::CX, [QubitId(0)])])
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_short_custom_matrix_rejected_on_push() {
        let gate = CustomGate {
            name: "short".into(),
            num_qubits: 2,
            matrix: vec![Complex64::new(1.0, 0.0); 4],
        };
        let mut program = Program::new();
        let err = program.gate(gate, [QubitId(0), QubitId(1)]).unwrap_err();
        assert!(matches!(err, IrError::InvalidMatrix { expected: 16, got: 4, .. }));
        assert!(program.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_repeated_operand() {
        let json = r#"{"instructions":[{"gate":{"kind":{"Standard":"CZ"}},"qubits":[0,0]}]}"#;
        assert!(serde_json::from_str::<Program>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_short_custom_matrix() {
        let json = r#"{"instructions":[{"gate":{"kind":{"Custom":
            {"name":"short","num_qubits":2,"matrix":[[1.0,0.0],[0.0,0.0],[0.0,0.0],[1.0,0.0]]}}},
            "qubits":[0,1]}]}"#;
        let err = serde_json::from_str::<Program>(json).unwrap_err();
        assert!(err.to_string().contains("expected 16"), "{err}");
    }

    #[test]
    fn test_deserialize_accepts_valid_program() {
        let json = r#"{"instructions":[{"gate":{"kind":{"Standard":"CZ"}},"qubits":[0,1]}]}"#;
        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.to_string(), "cz q0 q1\n");
    }
}
