//! Dense unitary evaluation of small programs.
//!
//! Used to check oracle and amplification constructions against their
//! ideal matrices. Register order is most-significant first: for
//! `register = [a, b, c]` the basis index of `|a b c⟩` is `4a + 2b + c`.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::program::Program;
use crate::qubit::QubitId;

/// Widest register accepted for dense evaluation.
pub const MAX_DENSE_QUBITS: usize = 10;

/// The `2^n × 2^n` unitary of `program` over `register`.
pub fn unitary(program: &Program, register: &[QubitId]) -> IrResult<Array2<Complex64>> {
    check_register(register)?;
    let dim = 1usize << register.len();
    let mut u = Array2::<Complex64>::eye(dim);
    for inst in program {
        let g = embed(inst, register)?;
        u = g.dot(&u);
    }
    Ok(u)
}

/// Apply `program` to a state vector over `register`.
pub fn apply(
    program: &Program,
    register: &[QubitId],
    state: &Array1<Complex64>,
) -> IrResult<Array1<Complex64>> {
    check_register(register)?;
    let dim = 1usize << register.len();
    if state.len() != dim {
        return Err(IrError::StateDimensionMismatch {
            expected: dim,
            got: state.len(),
        });
    }
    let mut psi = state.clone();
    for inst in program {
        psi = embed(inst, register)?.dot(&psi);
    }
    Ok(psi)
}

/// The computational basis state `|index⟩` of an `n`-qubit register.
pub fn basis_state(n: usize, index: usize) -> IrResult<Array1<Complex64>> {
    if n > MAX_DENSE_QUBITS {
        return Err(IrError::RegisterTooLarge {
            size: n,
            max: MAX_DENSE_QUBITS,
        });
    }
    let dim = 1usize << n;
    if index >= dim {
        return Err(IrError::BasisIndexOutOfRange { index, dim });
    }
    let mut psi = Array1::<Complex64>::zeros(dim);
    psi[index] = Complex64::new(1.0, 0.0);
    Ok(psi)
}

/// Check `a == e^{iφ} b` for some global phase φ.
pub fn equal_up_to_global_phase(
    a: &Array2<Complex64>,
    b: &Array2<Complex64>,
    tolerance: f64,
) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    // Phase from the largest entry of b.
    let Some((idx, pivot)) = b
        .indexed_iter()
        .max_by(|(_, x), (_, y)| x.norm().total_cmp(&y.norm()))
    else {
        return true;
    };
    if pivot.norm() <= tolerance {
        return a.iter().all(|x| x.norm() <= tolerance);
    }
    let phase = a[idx] / pivot;
    if (phase.norm() - 1.0).abs() > tolerance {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x - phase * y).norm() <= tolerance)
}

fn check_register(register: &[QubitId]) -> IrResult<()> {
    if register.len() > MAX_DENSE_QUBITS {
        return Err(IrError::RegisterTooLarge {
            size: register.len(),
            max: MAX_DENSE_QUBITS,
        });
    }
    for (i, q) in register.iter().enumerate() {
        if register[..i].contains(q) {
            return Err(IrError::DuplicateQubit {
                qubit: *q,
                gate_name: None,
            });
        }
    }
    Ok(())
}

/// Lift a gate matrix to the full register.
fn embed(inst: &Instruction, register: &[QubitId]) -> IrResult<Array2<Complex64>> {
    let n = register.len();
    let shifts = inst
        .qubits
        .iter()
        .map(|q| {
            register
                .iter()
                .position(|r| r == q)
                .map(|p| n - 1 - p)
                .ok_or_else(|| IrError::QubitNotFound {
                    qubit: *q,
                    gate_name: Some(inst.name().to_string()),
                })
        })
        .collect::<IrResult<Vec<_>>>()?;

    let k = shifts.len();
    let local_dim = 1usize << k;
    let matrix = inst.gate.matrix();
    let mask: usize = shifts.iter().map(|s| 1usize << s).sum();

    let dim = 1usize << n;
    let mut full = Array2::<Complex64>::zeros((dim, dim));
    for col in 0..dim {
        let local_col = gather(col, &shifts);
        let base = col & !mask;
        for local_row in 0..local_dim {
            let row = base | scatter(local_row, &shifts);
            full[[row, col]] = matrix[local_row * local_dim + local_col];
        }
    }
    Ok(full)
}

/// Operand bits of a global index, first operand most significant.
fn gather(index: usize, shifts: &[usize]) -> usize {
    let k = shifts.len();
    shifts
        .iter()
        .enumerate()
        .map(|(j, s)| ((index >> s) & 1) << (k - 1 - j))
        .sum()
}

/// Inverse of [`gather`] for a local index.
fn scatter(local: usize, shifts: &[usize]) -> usize {
    let k = shifts.len();
    shifts
        .iter()
        .enumerate()
        .map(|(j, s)| ((local >> (k - 1 - j)) & 1) << s)
        .sum()
}
