// src/gates/mod.rs

//! Gate matrices: the fixed qutrit permutation catalog plus caller-supplied
//! custom unitaries.
//!
//! The catalog covers the six 3-state permutations used throughout ternary
//! logic circuits: identity, the two cyclic shifts, and the three pairwise
//! swaps. All are real orthogonal permutation matrices, hence unitary. They
//! are qutrit-only; appending one to a circuit with `num_states != 3` fails
//! at the recorder with `UnsupportedDimension`.
//!
//! Custom gates bypass the catalog entirely: any square matrix of the
//! circuit's local dimension is accepted. Unitarity is not verified here —
//! physical correctness is the caller's responsibility. Callers who want the
//! check can run [`crate::validation::check_unitarity`] before appending.

use crate::core::{Matrix, QuditError};

/// Maximum display-label width, set by the fixed-width circuit rendering.
pub const MAX_LABEL_LEN: usize = 4;

/// A single-qudit gate: a `d x d` matrix plus a short display label.
///
/// Catalog constructors mark their gates as fixed so the recorder can reject
/// them on non-qutrit circuits; custom gates carry whatever dimension their
/// matrix has.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    matrix: Matrix,
    label: String,
    fixed: bool,
}

impl Gate {
    /// Wraps a caller-supplied matrix as a custom gate.
    ///
    /// The label is used only by the circuit rendering and must fit its
    /// fixed-width gate box.
    pub fn custom(matrix: Matrix, label: &str) -> Result<Self, QuditError> {
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(QuditError::NameTooLong {
                label: label.to_string(),
                max: MAX_LABEL_LEN,
            });
        }
        Ok(Self {
            matrix,
            label: label.to_string(),
            fixed: false,
        })
    }

    fn catalog(rows: &[&[f64]], label: &str) -> Self {
        Self {
            matrix: Matrix::from_real_rows(rows),
            label: label.to_string(),
            fixed: true,
        }
    }

    /// The gate matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The rendering label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Local dimension of the gate matrix.
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    /// Whether this gate came from the fixed qutrit catalog.
    pub(crate) fn is_fixed(&self) -> bool {
        self.fixed
    }
}

/// The qutrit identity gate.
pub fn identity() -> Gate {
    Gate::catalog(
        &[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]],
        "I",
    )
}

/// The qutrit "+1" gate: cyclic shift `k -> (k + 1) mod 3`.
pub fn plus1() -> Gate {
    Gate::catalog(
        &[&[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]],
        "+1",
    )
}

/// The qutrit "+2" gate: cyclic shift `k -> (k + 2) mod 3`.
pub fn plus2() -> Gate {
    Gate::catalog(
        &[&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0]],
        "+2",
    )
}

/// The qutrit "01" gate: swaps states 0 and 1, fixes state 2.
pub fn swap01() -> Gate {
    Gate::catalog(
        &[&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]],
        "01",
    )
}

/// The qutrit "02" gate: swaps states 0 and 2, fixes state 1.
pub fn swap02() -> Gate {
    Gate::catalog(
        &[&[0.0, 0.0, 1.0], &[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]],
        "02",
    )
}

/// The qutrit "12" gate: swaps states 1 and 2, fixes state 0.
pub fn swap12() -> Gate {
    Gate::catalog(
        &[&[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0], &[0.0, 1.0, 0.0]],
        "12",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matrix;
    use num_complex::Complex;

    const TOL: f64 = 1e-12;

    #[test]
    fn plus1_twice_equals_plus2() {
        let twice = plus1().matrix().matmul(plus1().matrix());
        assert!(twice.approx_eq(plus2().matrix(), TOL));
    }

    #[test]
    fn plus1_three_times_equals_identity() {
        let thrice = plus1()
            .matrix()
            .matmul(plus1().matrix())
            .matmul(plus1().matrix());
        assert!(thrice.approx_eq(identity().matrix(), TOL));
    }

    #[test]
    fn swaps_are_involutive() {
        for gate in [swap01(), swap02(), swap12()] {
            let squared = gate.matrix().matmul(gate.matrix());
            assert!(
                squared.approx_eq(identity().matrix(), TOL),
                "swap gate '{}' is not its own inverse",
                gate.label()
            );
        }
    }

    #[test]
    fn catalog_gates_are_unitary() {
        for gate in [identity(), plus1(), plus2(), swap01(), swap02(), swap12()] {
            let product = gate.matrix().matmul(&gate.matrix().adjoint());
            assert!(
                product.approx_eq(&Matrix::identity(3), TOL),
                "catalog gate '{}' is not unitary",
                gate.label()
            );
        }
    }

    #[test]
    fn custom_gate_label_width_is_enforced() {
        let m = Matrix::identity(4);
        assert!(Gate::custom(m.clone(), "CUST").is_ok());
        let err = Gate::custom(m, "TOOBIG").unwrap_err();
        assert_eq!(
            err,
            QuditError::NameTooLong {
                label: "TOOBIG".to_string(),
                max: MAX_LABEL_LEN
            }
        );
    }

    #[test]
    fn custom_gates_are_not_catalog_entries() {
        let gate = Gate::custom(Matrix::identity(5), "I5").unwrap();
        assert!(!gate.is_fixed());
        assert_eq!(gate.dim(), 5);
        assert_eq!(gate.matrix().get(0, 0), Complex::new(1.0, 0.0));
    }
}
