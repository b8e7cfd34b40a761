// src/validation/mod.rs

//! Numerical sanity checks on states, gates, and reported distributions.
//!
//! None of these run implicitly — custom gate matrices in particular are
//! accepted without a unitarity check, as downstream physical correctness is
//! the caller's contract. They exist for callers and tests that want the
//! verification.

use crate::core::{Matrix, QuditError};
use num_complex::Complex;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_UNITARITY_TOLERANCE: f64 = 1e-9;

/// Checks that an amplitude vector is normalized (sum of squared magnitudes
/// ≈ 1.0). Holds after any sequence of unitary gates.
///
/// # Arguments
/// * `amplitudes` - The state amplitudes to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to `1e-9`.
pub fn check_normalization(
    amplitudes: &[Complex<f64>],
    tolerance: Option<f64>,
) -> Result<(), QuditError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sqr: f64 = amplitudes.iter().map(|c| c.norm_sqr()).sum();
    if (norm_sqr - 1.0).abs() > effective_tolerance {
        Err(QuditError::SimulationError {
            message: format!(
                "state vector normalization failed: sum(|c_i|^2) = {} (deviation > {})",
                norm_sqr, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that a matrix is unitary: `M · M† ≈ I` component-wise.
///
/// # Arguments
/// * `matrix` - The candidate gate matrix.
/// * `tolerance` - Allowed component-wise deviation; defaults to `1e-9`.
pub fn check_unitarity(matrix: &Matrix, tolerance: Option<f64>) -> Result<(), QuditError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_UNITARITY_TOLERANCE);
    let product = matrix.matmul(&matrix.adjoint());
    if product.approx_eq(&Matrix::identity(matrix.dim()), effective_tolerance) {
        Ok(())
    } else {
        Err(QuditError::SimulationError {
            message: format!(
                "matrix is not unitary within tolerance {}",
                effective_tolerance
            ),
        })
    }
}

/// Checks that a reported marginal distribution is a probability
/// distribution: non-negative entries summing to 1.
///
/// # Arguments
/// * `probabilities` - The distribution to check.
/// * `tolerance` - Allowed deviation; defaults to `1e-9`.
pub fn check_distribution(probabilities: &[f64], tolerance: Option<f64>) -> Result<(), QuditError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    if let Some(p) = probabilities.iter().find(|p| **p < -effective_tolerance) {
        return Err(QuditError::SimulationError {
            message: format!("distribution has a negative probability: {}", p),
        });
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(QuditError::SimulationError {
            message: format!("distribution sums to {} instead of 1", total),
        });
    }
    Ok(())
}
