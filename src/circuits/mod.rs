// src/circuits/mod.rs

//! The circuit recorder: an ordered, append-only list of gate descriptors
//! over a fixed register.
//!
//! A [`Circuit`] is configured once with its register size and basis
//! dimension, then accumulates [`GateOp`] descriptors through the two append
//! operations. Appends validate eagerly — wiring, gate dimension, and the
//! qutrit-only catalog restriction are all checked at registration time, so
//! simulation never sees a malformed descriptor. The recorded list is never
//! mutated afterwards, which lets any number of simulation runs (and the
//! rendering) replay it independently.

use crate::core::QuditError;
use crate::gates::Gate;
use crate::operations::GateOp;
use std::fmt;

/// The default basis dimension: qutrits.
pub const DEFAULT_NUM_STATES: usize = 3;

/// An ordered sequence of gate applications on an `n`-qudit register.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qudits: usize,
    num_states: usize,
    /// Execution order; insertion order is load-bearing.
    steps: Vec<GateOp>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qudits` qudits with `num_states`
    /// basis states each.
    pub fn new(num_qudits: usize, num_states: usize) -> Result<Self, QuditError> {
        if num_qudits == 0 {
            return Err(QuditError::InvalidConfiguration {
                message: "a circuit needs at least one qudit".to_string(),
            });
        }
        if num_states < 2 {
            return Err(QuditError::InvalidConfiguration {
                message: format!("a qudit needs at least 2 basis states, got {}", num_states),
            });
        }
        Ok(Self {
            num_qudits,
            num_states,
            steps: Vec::new(),
        })
    }

    /// Creates an empty qutrit circuit (`num_states = 3`, the default).
    pub fn qutrit(num_qudits: usize) -> Result<Self, QuditError> {
        Self::new(num_qudits, DEFAULT_NUM_STATES)
    }

    /// Appends a single-qudit gate acting on `target`.
    pub fn append_single(&mut self, gate: Gate, target: usize) -> Result<(), QuditError> {
        self.check_gate(&gate)?;
        self.check_index(target, "target")?;
        self.steps.push(GateOp::Single { gate, target });
        Ok(())
    }

    /// Appends a controlled gate: `gate` is applied to `target` exactly when
    /// `control` is in the topmost basis state |d−1⟩.
    pub fn append_controlled(
        &mut self,
        gate: Gate,
        control: usize,
        target: usize,
    ) -> Result<(), QuditError> {
        self.check_gate(&gate)?;
        self.check_index(control, "control")?;
        self.check_index(target, "target")?;
        if control == target {
            return Err(QuditError::InvalidWiring {
                message: format!("control and target are both qudit {}", control),
            });
        }
        self.steps.push(GateOp::Controlled {
            gate,
            control,
            target,
        });
        Ok(())
    }

    /// Number of qudits in the register.
    pub fn num_qudits(&self) -> usize {
        self.num_qudits
    }

    /// Basis dimension `d` per qudit.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// The ordered, read-only descriptor list.
    pub fn steps(&self) -> &[GateOp] {
        &self.steps
    }

    /// Number of recorded gate applications.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no gates have been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn check_gate(&self, gate: &Gate) -> Result<(), QuditError> {
        if gate.is_fixed() && self.num_states != DEFAULT_NUM_STATES {
            return Err(QuditError::UnsupportedDimension {
                label: gate.label().to_string(),
                num_states: self.num_states,
            });
        }
        if gate.dim() != self.num_states {
            return Err(QuditError::DimensionMismatch {
                expected: self.num_states,
                found: gate.dim(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize, role: &str) -> Result<(), QuditError> {
        if index >= self.num_qudits {
            return Err(QuditError::InvalidWiring {
                message: format!(
                    "{} index {} out of range for {} qudits",
                    role, index, self.num_qudits
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "quditsim::Circuit[{} gates on {} qudits, d={}]",
            self.steps.len(),
            self.num_qudits,
            self.num_states
        )?;
        if self.steps.is_empty() {
            return Ok(());
        }

        // Grid dimensions and padding
        const GATE_WIDTH: usize = 8; // e.g. "───+1───"
        const WIRE: &str = "────────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        let num_steps = self.steps.len();
        let num_qudits = self.num_qudits;

        // op_grid[row][t] holds the gate/wire segment, v_connect[row][t] the
        // vertical connector drawn below that row.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_steps]; num_qudits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_steps]; num_qudits];

        // Centers a label inside a GATE_WIDTH cell of wire.
        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre = total_dashes / 2;
                let post = total_dashes - pre;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre),
                    symbol,
                    H_WIRE.to_string().repeat(post)
                )
            }
        }

        for (t, step) in self.steps.iter().enumerate() {
            match step {
                GateOp::Single { gate, target } => {
                    op_grid[*target][t] = format_gate(gate.label());
                }
                GateOp::Controlled {
                    gate,
                    control,
                    target,
                } => {
                    op_grid[*control][t] = format_gate("@");
                    op_grid[*target][t] = format_gate(gate.label());
                    let r_min = (*control).min(*target);
                    let r_max = (*control).max(*target);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
            }
        }

        let max_label_width = format!("q{}", num_qudits - 1).len();
        let label_padding = " ".repeat(max_label_width + 2);
        for r in 0..num_qudits {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qudits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_steps {
                    let connector = v_connect[r][t];
                    let padding = GATE_WIDTH.saturating_sub(1);
                    let pre = padding / 2;
                    let post = padding - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), connector, " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matrix;
    use crate::gates::{self, Gate};

    #[test]
    fn configuration_is_validated() {
        assert!(matches!(
            Circuit::new(0, 3),
            Err(QuditError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Circuit::new(2, 1),
            Err(QuditError::InvalidConfiguration { .. })
        ));
        assert!(Circuit::new(2, 2).is_ok());
    }

    #[test]
    fn catalog_gates_are_rejected_on_non_qutrit_circuits() {
        let mut circuit = Circuit::new(2, 4).unwrap();
        let err = circuit.append_single(gates::plus1(), 0).unwrap_err();
        assert_eq!(
            err,
            QuditError::UnsupportedDimension {
                label: "+1".to_string(),
                num_states: 4
            }
        );
        // A custom gate of the right dimension is the supported path.
        let custom = Gate::custom(Matrix::identity(4), "I4").unwrap();
        assert!(circuit.append_single(custom, 0).is_ok());
    }

    #[test]
    fn custom_gate_dimension_must_match_circuit() {
        let mut circuit = Circuit::qutrit(2).unwrap();
        let wrong = Gate::custom(Matrix::identity(2), "X2").unwrap();
        let err = circuit.append_single(wrong, 0).unwrap_err();
        assert_eq!(
            err,
            QuditError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn wiring_is_validated_eagerly() {
        let mut circuit = Circuit::qutrit(2).unwrap();
        assert!(matches!(
            circuit.append_single(gates::plus1(), 2),
            Err(QuditError::InvalidWiring { .. })
        ));
        assert!(matches!(
            circuit.append_controlled(gates::plus1(), 0, 0),
            Err(QuditError::InvalidWiring { .. })
        ));
        assert!(matches!(
            circuit.append_controlled(gates::plus1(), 3, 1),
            Err(QuditError::InvalidWiring { .. })
        ));
        // Nothing was recorded by the failed appends.
        assert!(circuit.is_empty());
    }

    #[test]
    fn steps_preserve_insertion_order() {
        let mut circuit = Circuit::qutrit(3).unwrap();
        circuit.append_single(gates::plus1(), 0).unwrap();
        circuit.append_controlled(gates::plus2(), 0, 2).unwrap();
        circuit.append_single(gates::swap12(), 1).unwrap();

        assert_eq!(circuit.len(), 3);
        let labels: Vec<&str> = circuit.steps().iter().map(|s| s.gate().label()).collect();
        assert_eq!(labels, vec!["+1", "+2", "12"]);
        assert_eq!(circuit.steps()[1].control(), Some(0));
    }

    #[test]
    fn display_renders_controls_and_labels() {
        let mut circuit = Circuit::qutrit(2).unwrap();
        circuit.append_single(gates::plus2(), 0).unwrap();
        circuit.append_controlled(gates::plus1(), 0, 1).unwrap();
        let drawn = format!("{}", circuit);
        assert!(drawn.contains("q0:"));
        assert!(drawn.contains("+2"));
        assert!(drawn.contains("@"));
        assert!(drawn.contains("│"));
    }
}
