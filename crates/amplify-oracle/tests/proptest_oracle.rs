//! Property-based tests for basis-selector oracles.

use amplify_ir::QubitId;
use amplify_ir::unitary::{apply, basis_state};
use amplify_oracle::{OracleError, basis_selector_oracle, bitstring_index};
use num_complex::Complex64;
use proptest::prelude::*;

/// Register widths and bitstrings of matching length.
fn arb_case() -> impl Strategy<Value = (Vec<QubitId>, String)> {
    (2usize..=5).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            // Distinct, unordered qubit ids.
            prop::sample::subsequence((0u32..16).collect::<Vec<_>>(), n).prop_shuffle(),
        )
            .prop_map(|(bits, ids)| {
                let bitstring: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
                (ids.into_iter().map(QubitId).collect(), bitstring)
            })
    })
}

proptest! {
    #[test]
    fn marked_state_negated_others_fixed(
        (qubits, bitstring) in arb_case(),
        pick in any::<prop::sample::Index>(),
    ) {
        let program = basis_selector_oracle(&qubits, &bitstring).unwrap();
        let n = qubits.len();
        let marked = bitstring_index(&bitstring).unwrap();

        // Marked state picks up -1.
        let psi = apply(&program, &qubits, &basis_state(n, marked).unwrap()).unwrap();
        prop_assert!((psi[marked] + Complex64::new(1.0, 0.0)).norm() < 1e-9);

        // Any other basis state is a fixed point.
        let other = pick.index(1 << n);
        if other != marked {
            let psi = apply(&program, &qubits, &basis_state(n, other).unwrap()).unwrap();
            prop_assert!((psi[other] - Complex64::new(1.0, 0.0)).norm() < 1e-9);
        }
    }

    #[test]
    fn flips_come_in_matching_pairs((qubits, bitstring) in arb_case()) {
        let program = basis_selector_oracle(&qubits, &bitstring).unwrap();
        let zeros = bitstring.chars().filter(|&c| c == '0').count();
        let flips = program.iter().filter(|inst| inst.name() == "x").count();
        prop_assert_eq!(flips, 2 * zeros);
    }

    #[test]
    fn mismatched_lengths_rejected(n in 1usize..6, m in 0usize..6) {
        prop_assume!(n != m);
        let qubits = QubitId::range(n as u32);
        let bitstring = "1".repeat(m);
        prop_assert!(matches!(
            basis_selector_oracle(&qubits, &bitstring),
            Err(OracleError::InvalidArgument(_))
        ));
    }
}
