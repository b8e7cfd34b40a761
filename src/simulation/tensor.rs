// src/simulation/tensor.rs

//! The tensor-contraction evolution engine.
//!
//! The register state is read as an `n`-axis tensor of shape `(d, ..., d)`
//! and every gate is applied as a contraction local to the target axis —
//! mathematically `I ⊗ ... ⊗ G ⊗ ... ⊗ I` without ever materializing that
//! operator. Cost per gate is `O(d^n)`, which admits registers far beyond the
//! full-operator engine's reach (roughly 17 qutrits), at the price of only
//! producing per-qudit marginals.
//!
//! Controlled-gate semantics: the gate fires only when the control axis
//! marginal is, within tolerance, the point mass on state `d−1`. This is a
//! *marginal-probability* test, not an amplitude test — faithful only while
//! the control qudit is unentangled and classically defined. For superposed
//! or entangled controls the gate is silently skipped instead of coherently
//! branching. Known limitation, preserved deliberately; the integration tests
//! pin the behavior.

use crate::circuits::Circuit;
use crate::core::{Matrix, QuditError, RegisterState};
use crate::operations::GateOp;
use crate::simulation::{EvolutionEngine, SimulationResult};
use num_complex::Complex;
use num_traits::Zero;

/// Tolerance for the control-firing comparison against the point mass
/// on state `d−1`.
const DEFAULT_CONTROL_TOLERANCE: f64 = 1e-9;

/// Evolves the register by axis-local tensor contractions.
#[derive(Debug, Clone)]
pub struct TensorNetworkEngine {
    control_tolerance: f64,
}

impl Default for TensorNetworkEngine {
    fn default() -> Self {
        Self {
            control_tolerance: DEFAULT_CONTROL_TOLERANCE,
        }
    }
}

impl TensorNetworkEngine {
    /// Creates an engine with the default control-firing tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the tolerance used when comparing the control marginal to
    /// the point mass on state `d−1`.
    pub fn with_control_tolerance(mut self, tolerance: f64) -> Self {
        self.control_tolerance = tolerance;
        self
    }
}

impl EvolutionEngine for TensorNetworkEngine {
    fn evolve(&self, circuit: &Circuit) -> Result<SimulationResult, QuditError> {
        let n = circuit.num_qudits();
        let d = circuit.num_states();
        let mut state = RegisterState::ground(d, n)?;

        for step in circuit.steps() {
            if let GateOp::Controlled { control, .. } = step {
                let control_marginal = axis_marginal(&state, *control);
                if !is_top_point_mass(&control_marginal, self.control_tolerance) {
                    // Control not definitely in |d−1⟩: the gate does not fire.
                    continue;
                }
            }
            let next = contract_axis(&state, step.target(), step.gate().matrix());
            state.replace(next);
        }

        let mut result = SimulationResult::new();
        for qudit in 0..n {
            result.record_marginal(qudit, axis_marginal(&state, qudit));
        }
        Ok(result)
    }
}

/// Contracts `axis` of the state tensor against the matrix's input axis,
/// keeping the output axis at the same position: for every setting of the
/// other axes, `new[a] = Σ_b M[a][b] · old[b]` along `axis`.
///
/// Under the flat layout, the entries along `axis` for one setting of the
/// remaining axes sit at `base + k · stride + offset`, so the contraction
/// walks blocks of `d · stride` and applies the `d x d` matrix to each strided
/// slice.
fn contract_axis(state: &RegisterState, axis: usize, matrix: &Matrix) -> Vec<Complex<f64>> {
    let d = state.num_states();
    let stride = state.axis_stride(axis);
    let block = stride * d;
    let old = state.amplitudes();
    let mut new = vec![Complex::zero(); old.len()];

    for base in (0..old.len()).step_by(block) {
        for offset in 0..stride {
            for a in 0..d {
                let mut acc = Complex::zero();
                for b in 0..d {
                    let m = matrix.get(a, b);
                    if !m.is_zero() {
                        acc += m * old[base + b * stride + offset];
                    }
                }
                new[base + a * stride + offset] = acc;
            }
        }
    }
    new
}

/// Marginal probability distribution of one axis: squared magnitudes summed
/// over every other axis.
fn axis_marginal(state: &RegisterState, axis: usize) -> Vec<f64> {
    let d = state.num_states();
    let stride = state.axis_stride(axis);
    let mut probabilities = vec![0.0; d];
    for (index, amplitude) in state.amplitudes().iter().enumerate() {
        let digit = (index / stride) % d;
        probabilities[digit] += amplitude.norm_sqr();
    }
    probabilities
}

/// Whether `marginal` is, within tolerance, the point distribution
/// concentrated on the topmost state.
fn is_top_point_mass(marginal: &[f64], tolerance: f64) -> bool {
    let top = marginal.len() - 1;
    marginal
        .iter()
        .enumerate()
        .all(|(state, p)| {
            let expected = if state == top { 1.0 } else { 0.0 };
            (p - expected).abs() < tolerance
        })
}
