// src/simulation/results.rs
use crate::core::Matrix;
use std::collections::HashMap;
use std::fmt;

/// Holds the observables reported by an evolution engine after replaying a
/// circuit.
///
/// Both engines fill the per-qudit marginal distributions. Reduced density
/// matrices and the sparse basis-outcome list are full-operator observables
/// only; the tensor engine never materializes the information needed for
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Maps qudit index to its length-`d` marginal probability vector.
    marginals: HashMap<usize, Vec<f64>>,
    /// Maps qudit index to its `d x d` reduced density matrix.
    density_matrices: HashMap<usize, Matrix>,
    /// Basis outcomes above the reporting threshold, as zero-padded base-`d`
    /// digit strings with their probabilities, sorted by basis index.
    basis_outcomes: Vec<(String, f64)>,
}

impl SimulationResult {
    /// Creates a new, empty result set. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self {
            marginals: HashMap::new(),
            density_matrices: HashMap::new(),
            basis_outcomes: Vec::new(),
        }
    }

    /// Records a qudit's marginal distribution. (Internal visibility)
    pub(crate) fn record_marginal(&mut self, qudit: usize, distribution: Vec<f64>) {
        self.marginals.insert(qudit, distribution);
    }

    /// Records a qudit's reduced density matrix. (Internal visibility)
    pub(crate) fn record_density_matrix(&mut self, qudit: usize, rho: Matrix) {
        self.density_matrices.insert(qudit, rho);
    }

    /// Records a basis-string outcome. (Internal visibility)
    pub(crate) fn record_basis_outcome(&mut self, label: String, probability: f64) {
        self.basis_outcomes.push((label, probability));
    }

    /// The marginal probability distribution of one qudit, if reported.
    pub fn marginal(&self, qudit: usize) -> Option<&[f64]> {
        self.marginals.get(&qudit).map(|v| v.as_slice())
    }

    /// The reduced density matrix of one qudit. `None` for results produced
    /// by the tensor engine.
    pub fn density_matrix(&self, qudit: usize) -> Option<&Matrix> {
        self.density_matrices.get(&qudit)
    }

    /// All reported marginal distributions.
    pub fn all_marginals(&self) -> &HashMap<usize, Vec<f64>> {
        &self.marginals
    }

    /// Basis outcomes above the reporting threshold (full-operator engine
    /// only), ordered by basis index.
    pub fn basis_outcomes(&self) -> &[(String, f64)] {
        &self.basis_outcomes
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        // Sort by qudit index for consistent and readable output
        let mut sorted: Vec<_> = self.marginals.iter().collect();
        sorted.sort_by_key(|(idx, _)| **idx);
        for (idx, probs) in sorted {
            write!(f, "  QUDIT {} state probabilities: [", idx)?;
            for (i, p) in probs.iter().enumerate() {
                write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, p)?;
            }
            writeln!(f, "]")?;
            if let Some(rho) = self.density_matrices.get(idx) {
                writeln!(f, "  QUDIT {} density matrix:", idx)?;
                for line in format!("{}", rho).lines() {
                    writeln!(f, "    {}", line)?;
                }
            }
        }
        if !self.basis_outcomes.is_empty() {
            writeln!(f, "  Basis outcomes:")?;
            for (label, probability) in &self.basis_outcomes {
                writeln!(f, "    |{}⟩: {:.5}", label, probability)?;
            }
        }
        Ok(())
    }
}
