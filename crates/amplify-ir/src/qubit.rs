//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle naming one register line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Consecutive identifiers `q0 .. q{n-1}`.
    pub fn range(n: u32) -> Vec<QubitId> {
        (0..n).map(QubitId).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
