// src/lib.rs

//! `quditsim` - A library for recording and simulating qudit circuits
//!
//! A circuit is a sequence of single-qudit and controlled two-qudit unitary
//! gates over a register of `n` qudits with `d` basis states each (`d = 3`,
//! qutrits, being the default). Recording and simulation are separate: the
//! [`Circuit`] recorder validates and accumulates gate descriptors, and one
//! of two interchangeable [`EvolutionEngine`] strategies replays them — the
//! [`FullOperatorEngine`] (dense full-register operators, density matrices
//! and basis distributions, small registers) or the [`TensorNetworkEngine`]
//! (axis-local contractions, marginals only, much larger registers).

pub mod circuits;
pub mod core;
pub mod gates;
pub mod operations;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::circuits::Circuit;
pub use crate::core::{Matrix, QuditError, RegisterState};
pub use crate::gates::Gate;
pub use crate::operations::GateOp;
pub use crate::simulation::{
    EvolutionEngine, FullOperatorEngine, SimulationResult, TensorNetworkEngine,
};

// Example 1: Qutrit increment
// A single qutrit stepped twice with the "+1" catalog gate ends in state 2;
// the full-operator engine reports the density matrix diag(0, 0, 1).
/// ```
/// use quditsim::{gates, Circuit, EvolutionEngine, FullOperatorEngine};
///
/// let mut circuit = Circuit::qutrit(1).unwrap();
/// circuit.append_single(gates::plus1(), 0).unwrap();
/// circuit.append_single(gates::plus1(), 0).unwrap();
///
/// let result = FullOperatorEngine::new().evolve(&circuit).unwrap();
/// let marginal = result.marginal(0).unwrap();
/// assert!((marginal[2] - 1.0).abs() < 1e-9);
///
/// let rho = result.density_matrix(0).unwrap();
/// assert_eq!(rho.get(2, 2).re, 1.0);
/// assert_eq!(rho.get(0, 0).re, 0.0);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Controlled gate over two qutrits
// "+2" drives the control qutrit to state 2, so the controlled "+1" fires and
// the target's marginal moves to state 1. The tensor engine reads this from
// the control axis marginal without building any full-register operator.
/// ```
/// use quditsim::{gates, Circuit, EvolutionEngine, TensorNetworkEngine};
///
/// let mut circuit = Circuit::qutrit(2).unwrap();
/// circuit.append_single(gates::plus2(), 0).unwrap();
/// circuit.append_controlled(gates::plus1(), 0, 1).unwrap();
///
/// let result = TensorNetworkEngine::new().evolve(&circuit).unwrap();
/// assert_eq!(result.marginal(0).unwrap(), &[0.0, 0.0, 1.0][..]);
/// assert_eq!(result.marginal(1).unwrap(), &[0.0, 1.0, 0.0][..]);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
