//! Basis-selector oracles.
//!
//! The oracle for bitstring `b` maps `|x⟩ → -|x⟩` if `x == b` and leaves
//! every other basis state alone. Qubits are ordered most significant
//! first and line up positionally with the characters of `b`.

use tracing::{debug, instrument};

use amplify_ir::{Program, QubitId, Unitary2x2};

use crate::controlled::{ControlledSynthesis, RecursiveControlled};
use crate::error::{OracleError, OracleResult};

/// Gate name given to the multi-controlled phase flip.
pub const PHASE_FLIP_GATE_NAME: &str = "Z";

/// Phase-flip oracle for `bitstring` using the default synthesis.
///
/// ```rust
/// use amplify_ir::QubitId;
/// use amplify_oracle::basis_selector_oracle;
///
/// let program = basis_selector_oracle(&QubitId::range(2), "10").unwrap();
/// assert_eq!(program.to_string(), "x q1\ncz q0 q1\nx q1\n");
/// ```
pub fn basis_selector_oracle(qubits: &[QubitId], bitstring: &str) -> OracleResult<Program> {
    basis_selector_oracle_with(&RecursiveControlled::new(), qubits, bitstring)
}

/// Phase-flip oracle for `bitstring`, building the controlled Z with `synthesis`.
///
/// A single qubit gets a bare `Z`, which separates `|0⟩` from `|1⟩` by a
/// relative phase of -1 whichever bit is selected. Wider registers are
/// conjugated by `X` on every `'0'` position so the target pattern reads
/// as all ones, then a Z controlled on all but the last qubit fires.
#[instrument(skip(synthesis, qubits), fields(num_qubits = qubits.len()))]
pub fn basis_selector_oracle_with(
    synthesis: &dyn ControlledSynthesis,
    qubits: &[QubitId],
    bitstring: &str,
) -> OracleResult<Program> {
    let bits = parse_bitstring(bitstring)?;
    if qubits.len() != bits.len() {
        return Err(OracleError::InvalidArgument(format!(
            "bitstring length {} does not match number of qubits {}",
            bits.len(),
            qubits.len()
        )));
    }
    for (i, q) in qubits.iter().enumerate() {
        if qubits[..i].contains(q) {
            return Err(OracleError::InvalidArgument(format!(
                "qubit {q} listed more than once"
            )));
        }
    }

    let Some((target, controls)) = qubits.split_last() else {
        return Err(OracleError::InvalidArgument(
            "oracle needs at least one qubit".into(),
        ));
    };

    let mut program = Program::new();

    if controls.is_empty() {
        program.z(*target)?;
        return Ok(program);
    }

    let flips: Vec<QubitId> = qubits
        .iter()
        .zip(&bits)
        .filter(|&(_, &bit)| !bit)
        .map(|(q, _)| *q)
        .collect();

    for q in &flips {
        program.x(*q)?;
    }
    let phase_flip = Unitary2x2::from_real([[1.0, 0.0], [0.0, -1.0]]);
    program += synthesis.synthesize(controls, *target, &phase_flip, PHASE_FLIP_GATE_NAME)?;
    for q in &flips {
        program.x(*q)?;
    }

    debug!(
        flips = flips.len(),
        instructions = program.len(),
        "Built basis selector oracle"
    );
    Ok(program)
}

/// Parse a `'0'`/`'1'` string, most significant bit first.
pub fn parse_bitstring(bitstring: &str) -> OracleResult<Vec<bool>> {
    bitstring
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(OracleError::InvalidArgument(format!(
                "bitstring may only contain '0' and '1', found {other:?}"
            ))),
        })
        .collect()
}

/// Basis index of `bitstring`, most significant bit first.
pub fn bitstring_index(bitstring: &str) -> OracleResult<usize> {
    let bits = parse_bitstring(bitstring)?;
    if bits.len() >= usize::BITS as usize {
        return Err(OracleError::InvalidArgument(format!(
            "bitstring of length {} does not fit a basis index",
            bits.len()
        )));
    }
    Ok(bits.iter().fold(0, |acc, &bit| (acc << 1) | usize::from(bit)))
}
