//! Error handling logic

use std::fmt;

/// Error types for circuit recording and simulation.
///
/// All recorder-level errors are caller errors and are raised eagerly at the
/// point of gate registration, never deferred to simulation time. Numerical
/// residue from floating-point arithmetic is not an error; engines clamp it
/// before reporting.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum QuditError {
    /// A fixed 3-state catalog gate was appended to a circuit whose basis
    /// dimension is not 3. Custom gates are the only path for `d != 3`.
    UnsupportedDimension {
        /// Display label of the offending gate.
        label: String,
        /// The circuit's basis dimension.
        num_states: usize,
    },

    /// A custom gate matrix whose size is incompatible with the circuit's
    /// basis dimension.
    DimensionMismatch {
        /// The circuit's basis dimension.
        expected: usize,
        /// The gate matrix's local dimension.
        found: usize,
    },

    /// A qudit index out of range, or a controlled gate wired with
    /// control == target.
    InvalidWiring {
        /// InvalidWiring failure message
        message: String,
    },

    /// A gate display label too wide for the fixed-width circuit rendering.
    NameTooLong {
        /// The rejected label.
        label: String,
        /// Maximum label width in characters.
        max: usize,
    },

    /// Invalid circuit construction parameters (zero qudits, `num_states < 2`).
    InvalidConfiguration {
        /// InvalidConfiguration failure message
        message: String,
    },

    /// General error encountered during the simulation process itself,
    /// e.g. the register dimension `d^n` overflowing `usize`.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl fmt::Display for QuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuditError::UnsupportedDimension { label, num_states } => write!(
                f,
                "Unsupported Dimension: catalog gate '{}' is qutrit-only but the circuit has {} basis states",
                label, num_states
            ),
            QuditError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension Mismatch: circuit expects {0}x{0} gate matrices, got {1}x{1}",
                expected, found
            ),
            QuditError::InvalidWiring { message } => write!(f, "Invalid Wiring: {}", message),
            QuditError::NameTooLong { label, max } => write!(
                f,
                "Name Too Long: gate label '{}' exceeds the {}-character rendering width",
                label, max
            ),
            QuditError::InvalidConfiguration { message } => {
                write!(f, "Invalid Configuration: {}", message)
            }
            QuditError::SimulationError { message } => {
                write!(f, "Simulation Process Error: {}", message)
            }
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for QuditError {}
