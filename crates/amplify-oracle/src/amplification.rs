//! Amplitude amplification built on basis-selector oracles.
//!
//! One amplification round for a state-preparation program `A` and a
//! phase oracle `O` is
//!
//! ```text
//! A · R₀ · A† · O,     R₀ = I - 2|0…0⟩⟨0…0|
//! ```
//!
//! which equals the textbook `(2|ψ⟩⟨ψ| - I) · O` up to a global sign.
//! `R₀` is itself the basis-selector oracle for the all-zeros string.
//! With `A = H^⊗n` this is Grover search.

use std::f64::consts::PI;

use tracing::{debug, instrument};

use amplify_ir::{Program, QubitId};

use crate::controlled::{ControlledSynthesis, RecursiveControlled};
use crate::error::{OracleError, OracleResult};
use crate::oracle::basis_selector_oracle_with;

/// Hadamard on every qubit.
pub fn uniform_superposition(qubits: &[QubitId]) -> OracleResult<Program> {
    let mut program = Program::new();
    for q in qubits {
        program.h(*q)?;
    }
    Ok(program)
}

/// Reflection about `|0…0⟩`: `I - 2|0…0⟩⟨0…0|`.
pub fn zero_reflection(
    synthesis: &dyn ControlledSynthesis,
    qubits: &[QubitId],
) -> OracleResult<Program> {
    let zeros = "0".repeat(qubits.len());
    basis_selector_oracle_with(synthesis, qubits, &zeros)
}

/// Grover diffusion `H^⊗n · R₀ · H^⊗n`, i.e. `2|s⟩⟨s| - I` up to sign.
pub fn diffusion_program(qubits: &[QubitId]) -> OracleResult<Program> {
    diffusion_program_with(&RecursiveControlled::new(), qubits)
}

/// [`diffusion_program`] with an explicit controlled-gate synthesis.
pub fn diffusion_program_with(
    synthesis: &dyn ControlledSynthesis,
    qubits: &[QubitId],
) -> OracleResult<Program> {
    let superposition = uniform_superposition(qubits)?;
    let mut program = superposition.clone();
    program += zero_reflection(synthesis, qubits)?;
    program += superposition;
    Ok(program)
}

/// Prepare with `algorithm`, then apply `iterations` amplification rounds.
pub fn amplification_program(
    algorithm: &Program,
    oracle: &Program,
    qubits: &[QubitId],
    iterations: usize,
) -> OracleResult<Program> {
    amplification_program_with(
        &RecursiveControlled::new(),
        algorithm,
        oracle,
        qubits,
        iterations,
    )
}

/// [`amplification_program`] with an explicit controlled-gate synthesis.
#[instrument(skip(synthesis, algorithm, oracle, qubits), fields(num_qubits = qubits.len()))]
pub fn amplification_program_with(
    synthesis: &dyn ControlledSynthesis,
    algorithm: &Program,
    oracle: &Program,
    qubits: &[QubitId],
    iterations: usize,
) -> OracleResult<Program> {
    if qubits.is_empty() {
        return Err(OracleError::InvalidArgument(
            "amplification needs at least one qubit".into(),
        ));
    }

    let reflection = zero_reflection(synthesis, qubits)?;
    let unprepare = algorithm.dagger();

    let mut program = algorithm.clone();
    for _ in 0..iterations {
        program += oracle;
        program += &unprepare;
        program += &reflection;
        program += algorithm;
    }

    debug!(
        iterations,
        instructions = program.len(),
        "Built amplification program"
    );
    Ok(program)
}

/// Grover search for `bitstring` over `qubits`.
///
/// `iterations = None` uses [`optimal_iterations`].
pub fn grover_program(
    qubits: &[QubitId],
    bitstring: &str,
    iterations: Option<usize>,
) -> OracleResult<Program> {
    let synthesis = RecursiveControlled::new();
    let iterations = iterations.unwrap_or_else(|| optimal_iterations(qubits.len()));
    let oracle = basis_selector_oracle_with(&synthesis, qubits, bitstring)?;
    let algorithm = uniform_superposition(qubits)?;
    amplification_program_with(&synthesis, &algorithm, &oracle, qubits, iterations)
}

/// Rounds maximising the success probability for one marked item among `2^n`.
///
/// With `sin θ = 1/√N` the success amplitude after `k` rounds is
/// `sin((2k+1)θ)`, peaking at `k = ⌊π/(4θ)⌋`. At least one round is
/// always returned.
pub fn optimal_iterations(n_qubits: usize) -> usize {
    let n_states = 2f64.powi(i32::try_from(n_qubits).unwrap_or(i32::MAX));
    let theta = (1.0 / n_states.sqrt()).asin();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let k = (PI / (4.0 * theta)).floor() as usize;
    k.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(1), 1);
        assert_eq!(optimal_iterations(2), 1); // θ = π/6, exactly one round
        assert_eq!(optimal_iterations(3), 2);
        assert_eq!(optimal_iterations(4), 3);
        assert_eq!(optimal_iterations(10), 25);
    }

    #[test]
    fn test_uniform_superposition() {
        let program = uniform_superposition(&QubitId::range(3)).unwrap();
        assert_eq!(program.len(), 3);
        assert!(program.iter().all(|inst| inst.name() == "h"));
    }

    #[test]
    fn test_zero_iterations_is_just_preparation() {
        let qubits = QubitId::range(2);
        let algorithm = uniform_superposition(&qubits).unwrap();
        let oracle = crate::oracle::basis_selector_oracle(&qubits, "01").unwrap();
        let program = amplification_program(&algorithm, &oracle, &qubits, 0).unwrap();
        assert_eq!(program, algorithm);
    }

    #[test]
    fn test_round_structure() {
        let qubits = QubitId::range(2);
        let algorithm = uniform_superposition(&qubits).unwrap();
        let oracle = crate::oracle::basis_selector_oracle(&qubits, "11").unwrap();
        let program = amplification_program(&algorithm, &oracle, &qubits, 2).unwrap();
        // prep(2) + 2 * (oracle(1) + unprep(2) + reflection(5) + prep(2))
        assert_eq!(program.len(), 2 + 2 * (1 + 2 + 5 + 2));
    }

    #[test]
    fn test_diffusion_uses_given_synthesis() {
        let custom_only = RecursiveControlled::with_config(
            crate::config::SynthesisConfig::new().with_native_gates(false),
        )
        .unwrap();
        let qubits = QubitId::range(2);
        let native = diffusion_program(&qubits).unwrap();
        let custom = diffusion_program_with(&custom_only, &qubits).unwrap();

        assert!(native.iter().any(|inst| inst.name() == "cz"));
        assert!(custom.iter().all(|inst| inst.name() != "cz"));
        assert!(custom.iter().any(|inst| inst.name() == "C-Z"));
        assert_eq!(custom.len(), native.len());
    }

    #[test]
    fn test_empty_register_rejected() {
        let err = amplification_program(&Program::new(), &Program::new(), &[], 1).unwrap_err();
        assert!(matches!(err, OracleError::InvalidArgument(_)));
    }

    #[test]
    fn test_grover_rejects_bad_bitstring() {
        assert!(grover_program(&QubitId::range(2), "2", None).is_err());
        assert!(grover_program(&QubitId::range(2), "101", None).is_err());
    }
}
