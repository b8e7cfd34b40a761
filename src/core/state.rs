// src/core/state.rs

use crate::core::QuditError;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The amplitude vector of an `n`-qudit register with `d` basis states each.
///
/// Both evolution engines instantiate this independently. The flat vector of
/// length `d^n` doubles as a rank-`n` tensor of shape `(d, ..., d)` through a
/// fixed axis-to-position mapping: axis `i` has stride `d^(n-1-i)`, so axis 0
/// is the most significant base-`d` digit of the flat index. Engines mutate
/// the state only by full replacement after each gate application.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point amplitudes
pub struct RegisterState {
    num_qudits: usize,
    num_states: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl RegisterState {
    /// Builds the all-zero computational basis state |0...0⟩.
    ///
    /// Fails with `SimulationError` if `d^n` overflows `usize`.
    pub fn ground(num_states: usize, num_qudits: usize) -> Result<Self, QuditError> {
        let dim = num_states
            .checked_pow(num_qudits as u32)
            .ok_or_else(|| QuditError::SimulationError {
                message: format!(
                    "register dimension {}^{} overflows usize",
                    num_states, num_qudits
                ),
            })?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            num_qudits,
            num_states,
            amplitudes,
        })
    }

    /// Number of qudits `n`.
    pub fn num_qudits(&self) -> usize {
        self.num_qudits
    }

    /// Basis dimension `d` per qudit.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Full register dimension `d^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitude vector.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Flat-index stride of `axis` under the fixed axis-to-position mapping.
    pub fn axis_stride(&self, axis: usize) -> usize {
        self.num_states.pow((self.num_qudits - 1 - axis) as u32)
    }

    /// Replaces the amplitude vector wholesale. The engines use this after
    /// each gate so no partially-updated state is ever observable.
    pub(crate) fn replace(&mut self, amplitudes: Vec<Complex<f64>>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    /// Sum of squared amplitude magnitudes; 1.0 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for RegisterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
