// src/operations/mod.rs

//! Gate descriptors: the immutable records of one circuit step.
//!
//! A descriptor ties a gate matrix to the qudit wires it acts on. The
//! recorder appends descriptors in execution order and never mutates them;
//! both evolution engines and the circuit rendering consume the same ordered
//! list.

use crate::gates::Gate;

/// One recorded circuit step.
///
/// Ordering in the recorded list is the temporal order of circuit execution,
/// not just display order.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOp {
    /// A gate applied unconditionally to one target qudit.
    Single {
        /// The gate to apply.
        gate: Gate,
        /// Index of the target qudit.
        target: usize,
    },

    /// A gate applied to the target qudit conditioned on the control qudit
    /// being in its topmost basis state |d−1⟩.
    Controlled {
        /// The gate to apply when the control fires.
        gate: Gate,
        /// Index of the control qudit.
        control: usize,
        /// Index of the target qudit.
        target: usize,
    },
}

impl GateOp {
    /// The gate recorded in this step.
    pub fn gate(&self) -> &Gate {
        match self {
            GateOp::Single { gate, .. } => gate,
            GateOp::Controlled { gate, .. } => gate,
        }
    }

    /// The target qudit index.
    pub fn target(&self) -> usize {
        match self {
            GateOp::Single { target, .. } => *target,
            GateOp::Controlled { target, .. } => *target,
        }
    }

    /// The control qudit index, if this is a controlled step.
    pub fn control(&self) -> Option<usize> {
        match self {
            GateOp::Single { .. } => None,
            GateOp::Controlled { control, .. } => Some(*control),
        }
    }

    /// All qudit indices this step touches.
    pub fn involved_qudits(&self) -> Vec<usize> {
        match self {
            GateOp::Single { target, .. } => vec![*target],
            GateOp::Controlled { control, target, .. } => vec![*control, *target],
        }
    }
}
