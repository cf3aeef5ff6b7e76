//! 2x2 unitary algebra.
//!
//! Single-qubit operations handed to the controlled-operation builder are
//! [`Unitary2x2`] values. Besides the usual products and adjoints, the
//! builder needs matrix square roots and the 4x4 controlled embedding
//! `|0⟩⟨0| ⊗ I + |1⟩⟨1| ⊗ U`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Default tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create a matrix from real entries, row-major.
    pub fn from_real(rows: [[f64; 2]; 2]) -> Self {
        Self::new(
            Complex64::new(rows[0][0], 0.0),
            Complex64::new(rows[0][1], 0.0),
            Complex64::new(rows[1][0], 0.0),
            Complex64::new(rows[1][1], 0.0),
        )
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = 1.0 / 2.0_f64.sqrt();
        Self::from_real([[s, s], [s, -s]])
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// Create an S gate (sqrt(Z)).
    pub fn s() -> Self {
        Self::p(PI / 2.0)
    }

    /// Create an S-dagger gate.
    pub fn sdg() -> Self {
        Self::p(-PI / 2.0)
    }

    /// Create a T gate (fourth root of Z).
    pub fn t() -> Self {
        Self::p(PI / 4.0)
    }

    /// Create a T-dagger gate.
    pub fn tdg() -> Self {
        Self::p(-PI / 4.0)
    }

    /// Create a phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda))
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Determinant.
    pub fn det(&self) -> Complex64 {
        self.data[0] * self.data[3] - self.data[1] * self.data[2]
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.data[0] + self.data[3]
    }

    /// A square root `V` with `V * V == self`.
    ///
    /// Uses `V = (M + sI) / t` with `s² = det M` and `t² = tr M + 2s`
    /// (Cayley-Hamilton). The sign of `s` is chosen to keep `t` away from
    /// zero, which for a unitary input always leaves a valid root. For the
    /// Pauli matrices this yields the familiar roots: `sqrt(Z) = S`,
    /// `sqrt(X) = SX`.
    pub fn sqrt(&self) -> Self {
        // Pin the branch of sqrt(det) so signed zeros cannot flip S into Sdg.
        let mut s = self.det().sqrt();
        if s.im < -EPSILON || (s.im.abs() <= EPSILON && s.re < 0.0) {
            s = -s;
        }
        let tr = self.trace();
        let plus = tr + 2.0 * s;
        let minus = tr - 2.0 * s;
        let (s, t_sq) = if plus.norm() >= minus.norm() {
            (s, plus)
        } else {
            (-s, minus)
        };
        let t = t_sq.sqrt();
        let [a, b, c, d] = self.data;
        Self::new((a + s) / t, b / t, c / t, (d + s) / t)
    }

    /// Check unitarity: `U · U† ≈ I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let product = self.mul(&self.dagger());
        product.approx_eq(&Self::identity(), tolerance)
    }

    /// Element-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }
        (a - d).norm() < EPSILON
    }

    /// The 4x4 controlled embedding in row-major order.
    ///
    /// The control is the first (most significant) operand.
    pub fn controlled(&self) -> Vec<Complex64> {
        let [a, b, c, d] = self.data;
        vec![
            ONE, ZERO, ZERO, ZERO, //
            ZERO, ONE, ZERO, ZERO, //
            ZERO, ZERO, a, b, //
            ZERO, ZERO, c, d,
        ]
    }

    /// Row-major entries as a vector.
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.data.to_vec()
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert!(Unitary2x2::identity().is_identity());
    }

    #[test]
    fn test_pauli_squared() {
        let x = Unitary2x2::x();
        let y = Unitary2x2::y();
        let z = Unitary2x2::z();

        assert!((x * x).is_identity());
        assert!((y * y).is_identity());
        assert!((z * z).is_identity());
    }

    #[test]
    fn test_sqrt_z_is_s() {
        let root = Unitary2x2::z().sqrt();
        assert!(root.approx_eq(&Unitary2x2::s(), 1e-12));
    }

    #[test]
    fn test_sqrt_x_squares_back() {
        let x = Unitary2x2::x();
        let root = x.sqrt();
        assert!((root * root).approx_eq(&x, 1e-12));
        assert!(root.is_unitary(1e-12));
    }

    #[test]
    fn test_sqrt_identity() {
        let root = Unitary2x2::identity().sqrt();
        assert!(root.approx_eq(&Unitary2x2::identity(), 1e-12));
    }

    #[test]
    fn test_sqrt_hadamard() {
        let h = Unitary2x2::h();
        let root = h.sqrt();
        assert!((root * root).approx_eq(&h, 1e-12));
    }

    #[test]
    fn test_repeated_roots_stay_unitary() {
        let mut m = Unitary2x2::z();
        for _ in 0..6 {
            let root = m.sqrt();
            assert!(root.is_unitary(1e-10));
            assert!((root * root).approx_eq(&m, 1e-10));
            m = root;
        }
    }

    #[test]
    fn test_non_unitary_detected() {
        let m = Unitary2x2::from_real([[1.0, 1.0], [0.0, 1.0]]);
        assert!(!m.is_unitary(EPSILON));
    }

    #[test]
    fn test_controlled_embedding() {
        let cz = Unitary2x2::z().controlled();
        assert_eq!(cz.len(), 16);
        for (i, expected) in [1.0, 1.0, 1.0, -1.0].iter().enumerate() {
            assert!((cz[i * 4 + i] - Complex64::new(*expected, 0.0)).norm() < EPSILON);
        }
        assert!(cz[2 * 4 + 3].norm() < EPSILON);
    }
}
