// src/simulation/engine.rs

//! The full-operator evolution engine.
//!
//! Every recorded gate is extended to a dense operator over the whole
//! register via Kronecker products and applied by left-multiplying the state
//! vector. Controlled gates are built with the projector-deviation lemma (see
//! [`controlled_operator`]) instead of the generic sum over all `d` control
//! projectors.

use crate::circuits::Circuit;
use crate::core::{Matrix, QuditError, RegisterState};
use crate::operations::GateOp;
use crate::simulation::{EvolutionEngine, SimulationResult};

/// Magnitudes below this are clamped to exact zero in reported density
/// matrices; floating-point residue, not physics.
const DEFAULT_CLAMP_THRESHOLD: f64 = 1e-15;

/// Basis outcomes with probability at or below this are omitted from the
/// reported distribution.
const DEFAULT_REPORT_THRESHOLD: f64 = 1e-5;

/// Evolves the register by sequential application of full-register operators.
///
/// Exact to floating-point precision for any sequence of unitary gates. Cost
/// per gate is `O(d^{2n})` in both time and transient memory (one dense
/// operator), so this engine is only practical for small registers — around
/// 8 qutrits.
#[derive(Debug, Clone)]
pub struct FullOperatorEngine {
    clamp_threshold: f64,
    report_threshold: f64,
}

impl Default for FullOperatorEngine {
    fn default() -> Self {
        Self {
            clamp_threshold: DEFAULT_CLAMP_THRESHOLD,
            report_threshold: DEFAULT_REPORT_THRESHOLD,
        }
    }
}

impl FullOperatorEngine {
    /// Creates an engine with the default clamp and reporting thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the threshold below which basis outcomes are omitted from
    /// the reported distribution.
    pub fn with_report_threshold(mut self, threshold: f64) -> Self {
        self.report_threshold = threshold;
        self
    }
}

impl EvolutionEngine for FullOperatorEngine {
    fn evolve(&self, circuit: &Circuit) -> Result<SimulationResult, QuditError> {
        let n = circuit.num_qudits();
        let d = circuit.num_states();
        let mut state = RegisterState::ground(d, n)?;

        for step in circuit.steps() {
            let operator = match step {
                GateOp::Single { gate, target } => {
                    embed_locals(n, d, &[(*target, gate.matrix())])
                }
                GateOp::Controlled {
                    gate,
                    control,
                    target,
                } => controlled_operator(gate.matrix(), *control, *target, n, d),
            };
            let next = operator.mul_vec(state.amplitudes());
            state.replace(next);
        }

        let mut result = SimulationResult::new();
        for qudit in 0..n {
            let mut rho = partial_trace(&state, qudit);
            rho.clamp_small(self.clamp_threshold);
            result.record_marginal(qudit, rho.real_diagonal());
            result.record_density_matrix(qudit, rho);
        }
        for (index, amplitude) in state.amplitudes().iter().enumerate() {
            let probability = amplitude.norm_sqr();
            if probability > self.report_threshold {
                result.record_basis_outcome(basis_label(index, d, n), probability);
            }
        }
        Ok(result)
    }
}

/// Extends local `d x d` operators to the full register by a Kronecker chain:
/// identity at every position except those listed in `slots`.
///
/// Folding starts from the 1x1 identity (the scalar 1), so the result is
/// well-formed for any `n >= 1`.
fn embed_locals(n: usize, d: usize, slots: &[(usize, &Matrix)]) -> Matrix {
    let identity = Matrix::identity(d);
    let mut operator = Matrix::identity(1);
    for position in 0..n {
        let local = slots
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, m)| *m)
            .unwrap_or(&identity);
        operator = operator.kron(local);
    }
    operator
}

/// Builds the full-register operator for a controlled gate.
///
/// Projector-deviation lemma: with `P = |d−1⟩⟨d−1|` embedded at the control
/// position and `(G − I)` embedded at the target position,
///
/// ```text
/// C = I_full + P_full · (G − I)_full
/// ```
///
/// applies `G` to the target exactly when the control is in state `d−1` and
/// the identity otherwise. It is algebraically equal to the generic sum over
/// all `d` control-branch projectors because only the top branch deviates
/// from identity; the unit tests below verify the equality directly. Since
/// `P_full` and `(G − I)_full` act on disjoint tensor slots, their product is
/// the single Kronecker chain with both locals inserted — no full-size matrix
/// multiplication is needed.
fn controlled_operator(gate: &Matrix, control: usize, target: usize, n: usize, d: usize) -> Matrix {
    let deviation = gate.sub(&Matrix::identity(d));
    let top_projector = Matrix::projector(d, d - 1);
    let conditioned = embed_locals(n, d, &[(control, &top_projector), (target, &deviation)]);
    Matrix::identity(conditioned.dim()).add(&conditioned)
}

/// Reduced density matrix of `qudit`: the outer product of the state with its
/// own conjugate, traced over every other axis.
///
/// `rho[a][b] = Σ_rest ψ[rest, a] · ψ*[rest, b]`, evaluated with stride
/// arithmetic on the flat vector instead of materializing the `d^n x d^n`
/// outer product.
fn partial_trace(state: &RegisterState, qudit: usize) -> Matrix {
    let d = state.num_states();
    let stride = state.axis_stride(qudit);
    let psi = state.amplitudes();
    let mut rho = Matrix::zeros(d);
    for (index, amplitude) in psi.iter().enumerate() {
        if amplitude.norm_sqr() == 0.0 {
            continue;
        }
        let a = (index / stride) % d;
        let base = index - a * stride;
        for b in 0..d {
            let value = rho.get(a, b) + amplitude * psi[base + b * stride].conj();
            rho.set(a, b, value);
        }
    }
    rho
}

/// Zero-padded base-`d` digit string of a flat basis index, most significant
/// qudit first.
fn basis_label(index: usize, d: usize, n: usize) -> String {
    let mut digits = vec!['0'; n];
    let mut rest = index;
    for slot in digits.iter_mut().rev() {
        let digit = (rest % d) as u32;
        *slot = std::char::from_digit(digit, 36).unwrap_or('?');
        rest /= d;
    }
    digits.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates;
    use num_complex::Complex;

    const TOL: f64 = 1e-12;

    /// Brute-force construction: one term per control branch,
    /// `Σ_k (|k⟩⟨k| at control) ⊗ (G if k == d−1 else I at target)`.
    fn projector_sum_operator(
        gate: &Matrix,
        control: usize,
        target: usize,
        n: usize,
        d: usize,
    ) -> Matrix {
        let mut total = Matrix::zeros(d.pow(n as u32));
        for k in 0..d {
            let branch_projector = Matrix::projector(d, k);
            let target_op = if k == d - 1 {
                gate.clone()
            } else {
                Matrix::identity(d)
            };
            let term = embed_locals(n, d, &[(control, &branch_projector), (target, &target_op)]);
            total = total.add(&term);
        }
        total
    }

    #[test]
    fn lemma_matches_projector_sum() {
        let cases: Vec<(Matrix, usize, usize, usize, usize)> = vec![
            (gates::plus1().matrix().clone(), 0, 1, 2, 3),
            (gates::swap02().matrix().clone(), 1, 0, 2, 3),
            (gates::plus2().matrix().clone(), 2, 0, 3, 3),
            // Binary case: controlled flip over qubits.
            (
                Matrix::from_real_rows(&[&[0.0, 1.0], &[1.0, 0.0]]),
                0,
                1,
                2,
                2,
            ),
        ];
        for (gate, control, target, n, d) in cases {
            let fused = controlled_operator(&gate, control, target, n, d);
            let brute = projector_sum_operator(&gate, control, target, n, d);
            assert!(
                fused.approx_eq(&brute, TOL),
                "lemma construction diverges from projector sum (control={}, target={}, n={}, d={})",
                control,
                target,
                n,
                d
            );
        }
    }

    #[test]
    fn lemma_matches_explicit_product_form() {
        // C = I + P_full * (G - I)_full, with the product taken as an actual
        // matrix multiplication rather than a fused Kronecker chain.
        let (n, d) = (2, 3);
        let gate = gates::plus1().matrix().clone();
        let p_full = embed_locals(n, d, &[(0, &Matrix::projector(d, d - 1))]);
        let deviation = gate.sub(&Matrix::identity(d));
        let dev_full = embed_locals(n, d, &[(1, &deviation)]);
        let explicit = Matrix::identity(9).add(&p_full.matmul(&dev_full));
        let fused = controlled_operator(&gate, 0, 1, n, d);
        assert!(fused.approx_eq(&explicit, TOL));
    }

    #[test]
    fn controlled_operator_fires_only_on_top_state() {
        // 2 qutrits, control=0 target=1, gate=+1.
        let op = controlled_operator(gates::plus1().matrix(), 0, 1, 2, 3);
        // |20> (index 6) -> |21> (index 7)
        let mut input = vec![Complex::new(0.0, 0.0); 9];
        input[6] = Complex::new(1.0, 0.0);
        let output = op.mul_vec(&input);
        assert!((output[7].re - 1.0).abs() < TOL);
        // |10> (index 3) is untouched.
        let mut input = vec![Complex::new(0.0, 0.0); 9];
        input[3] = Complex::new(1.0, 0.0);
        let output = op.mul_vec(&input);
        assert!((output[3].re - 1.0).abs() < TOL);
    }

    #[test]
    fn embed_locals_places_gate_at_target() {
        // plus1 on qudit 1 of 2: ground |00> -> |01> (index 1).
        let op = embed_locals(2, 3, &[(1, gates::plus1().matrix())]);
        let mut input = vec![Complex::new(0.0, 0.0); 9];
        input[0] = Complex::new(1.0, 0.0);
        let output = op.mul_vec(&input);
        assert!((output[1].re - 1.0).abs() < TOL);
    }

    #[test]
    fn partial_trace_of_product_state() -> Result<(), QuditError> {
        // plus1 on qudit 0 of 2 qutrits leaves the product state |1>|0>.
        let mut state = RegisterState::ground(3, 2)?;
        let op = embed_locals(2, 3, &[(0, gates::plus1().matrix())]);
        let next = op.mul_vec(state.amplitudes());
        state.replace(next);

        let rho0 = partial_trace(&state, 0);
        let rho1 = partial_trace(&state, 1);
        assert!((rho0.get(1, 1).re - 1.0).abs() < TOL);
        assert!(rho0.get(0, 0).norm() < TOL);
        assert!((rho1.get(0, 0).re - 1.0).abs() < TOL);
        Ok(())
    }

    #[test]
    fn basis_labels_are_zero_padded_base_d() {
        assert_eq!(basis_label(0, 3, 3), "000");
        assert_eq!(basis_label(7, 3, 3), "021");
        assert_eq!(basis_label(26, 3, 3), "222");
        assert_eq!(basis_label(5, 2, 4), "0101");
    }
}
