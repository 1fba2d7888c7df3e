//! Oracle compiler: graph plus sizing in, phase oracle out.
//!
//! The oracle marks computational-basis states that spell a walk from
//! the start node to the end node. One ancilla per transition records
//! edge validity; an optional second bank records turn-back checks.
//! A multi-controlled Z across all ancillas flips the phase when every
//! check passed, and the whole compute stage is then run in reverse so
//! the ancillas return to zero before the diffusion step.

use rustc_hash::FxHashSet;
use tracing::debug;

use daedalus_ir::{Circuit, QubitId};

use crate::error::{MazeError, MazeResult};
use crate::graph::Graph;
use crate::sizing::{AncillaLayout, PathSizing};

/// Compiles the phase oracle for one search problem.
#[derive(Debug)]
pub struct OracleBuilder<'a> {
    graph: &'a Graph,
    sizing: PathSizing,
    layout: AncillaLayout,
    turn_back_check: bool,
}

impl<'a> OracleBuilder<'a> {
    /// Set up a builder for a sized graph.
    pub fn new(graph: &'a Graph, sizing: PathSizing, turn_back_check: bool) -> Self {
        Self {
            graph,
            sizing,
            layout: AncillaLayout::new(&sizing, turn_back_check),
            turn_back_check,
        }
    }

    /// The ancilla layout the compiled oracle uses.
    pub fn layout(&self) -> AncillaLayout {
        self.layout
    }

    /// Compile the oracle circuit.
    ///
    /// Width is path qubits plus ancillas; the caller embeds it at the
    /// bottom of the search register. All ancillas are zero on entry and
    /// zero again on exit.
    pub fn build(&self) -> MazeResult<Circuit> {
        let bits = self.sizing.bits_per_node();
        let length = self.sizing.max_path_length();
        let total = self.layout.total_qubits();

        let pairs = self.directed_pairs()?;
        let mut compute = Circuit::with_size("path_checks", total, 0);

        if length == 1 {
            // A single transition is both the first and the last one, so
            // it gets one combined start-to-end check on one ancilla.
            let start = self.graph.start().id();
            let end = self.graph.end().id();
            let only: Vec<_> = pairs
                .iter()
                .copied()
                .filter(|&(from, to)| from == start && to == end)
                .collect();
            let check = edge_check(&only, bits)?;
            compute.append(&check, &transition_wires(&self.sizing, 0, self.layout.edge_ancilla(0)))?;
        } else {
            let end = self.graph.end().id();
            let last: Vec<_> = pairs.iter().copied().filter(|&(_, to)| to == end).collect();
            let check = edge_check(&last, bits)?;
            compute.append(
                &check,
                &transition_wires(&self.sizing, length - 1, self.layout.edge_ancilla(length - 1)),
            )?;

            let start = self.graph.start().id();
            let first: Vec<_> = pairs
                .iter()
                .copied()
                .filter(|&(from, _)| from == start)
                .collect();
            let check = edge_check(&first, bits)?;
            compute.append(&check, &transition_wires(&self.sizing, 0, self.layout.edge_ancilla(0)))?;

            let check = edge_check(&pairs, bits)?;
            for t in 1..length - 1 {
                compute.append(
                    &check,
                    &transition_wires(&self.sizing, t, self.layout.edge_ancilla(t)),
                )?;
            }
        }

        if self.turn_back_check {
            let check = self.turn_back_circuit()?;
            for s in 1..length {
                let base = (s - 1) * bits;
                let mut wires: Vec<QubitId> = (base..base + 3 * bits).map(QubitId).collect();
                wires.push(self.layout.turn_back_ancilla(s - 1));
                compute.append(&check, &wires)?;
            }
        }

        let identity: Vec<QubitId> = (0..total).map(QubitId).collect();
        let mut oracle = Circuit::with_size("maze_oracle", total, 0);
        oracle.append(&compute, &identity)?;

        let ancillas = self.layout.ancilla_qubits();
        match ancillas.split_last() {
            Some((&target, [])) => {
                oracle.z(target)?;
            }
            Some((&target, controls)) => {
                oracle.mcz(controls, target)?;
            }
            None => {}
        }

        oracle.append(&compute.inverse()?, &identity)?;

        debug!(
            total_qubits = total,
            num_ancillas = self.layout.num_ancillas(),
            directed_pairs = pairs.len(),
            gates = oracle.gate_count(),
            "compiled maze oracle"
        );
        Ok(oracle)
    }

    /// Expand the undirected edge list into directed pairs, plus the
    /// synthetic self-loop on the end node that lets short paths idle
    /// there for the remaining transitions.
    ///
    /// Duplicate directed pairs are a hard error: a repeated pair would
    /// toggle a shared ancilla twice and erase the check.
    fn directed_pairs(&self) -> MazeResult<Vec<(u32, u32)>> {
        let mut seen = FxHashSet::default();
        let mut pairs = Vec::with_capacity(2 * self.graph.edges().len() + 1);

        let mut push = |from: u32, to: u32, pairs: &mut Vec<(u32, u32)>| {
            if seen.insert((from, to)) {
                pairs.push((from, to));
                Ok(())
            } else {
                Err(MazeError::DuplicateEdge { from, to })
            }
        };

        for edge in self.graph.edges() {
            let (a, b) = (edge.start().id(), edge.end().id());
            push(a, b, &mut pairs)?;
            if a != b {
                push(b, a, &mut pairs)?;
            }
        }

        let end = self.graph.end().id();
        if !seen.contains(&(end, end)) {
            pairs.push((end, end));
        }
        Ok(pairs)
    }

    /// Turn-back check over three consecutive node registers.
    ///
    /// The ancilla toggles when the registers one step before and one
    /// step after differ, and toggles back when the first two registers
    /// both hold the end node, so idling at the goal is not penalized.
    fn turn_back_circuit(&self) -> MazeResult<Circuit> {
        let bits = self.sizing.bits_per_node();
        let ancilla = QubitId(3 * bits);
        let mut circuit = Circuit::with_size("turn_back_check", 3 * bits + 1, 0);

        // Register 2 bit i becomes 1 iff it agrees with register 0 bit i.
        let mut equality = Circuit::with_size("node_equality", 3 * bits, 0);
        for i in 0..bits {
            equality.cx(QubitId(i), QubitId(i + 2 * bits))?;
            equality.x(QubitId(i + 2 * bits))?;
        }

        let three_regs: Vec<QubitId> = (0..3 * bits).map(QubitId).collect();
        let third_reg: Vec<QubitId> = (2 * bits..3 * bits).map(QubitId).collect();
        circuit.append(&equality, &three_regs)?;
        circuit.mcx(&third_reg, ancilla)?;
        circuit.x(ancilla)?;
        circuit.append(&equality.inverse()?, &three_regs)?;

        // Goal exemption on the first two registers.
        let end = self.graph.end().id();
        let pattern = node_pattern(end, bits)?;
        let first_reg: Vec<QubitId> = (0..bits).map(QubitId).collect();
        let second_reg: Vec<QubitId> = (bits..2 * bits).map(QubitId).collect();
        let two_regs: Vec<QubitId> = (0..2 * bits).map(QubitId).collect();
        circuit.append(&pattern, &first_reg)?;
        circuit.append(&pattern, &second_reg)?;
        circuit.mcx(&two_regs, ancilla)?;
        circuit.append(&pattern, &second_reg)?;
        circuit.append(&pattern, &first_reg)?;

        Ok(circuit)
    }
}

/// Wires for the edge check at transition `t`: the two node registers
/// of the transition followed by its ancilla.
fn transition_wires(sizing: &PathSizing, t: u32, ancilla: QubitId) -> Vec<QubitId> {
    let bits = sizing.bits_per_node();
    let base = t * bits;
    let mut wires: Vec<QubitId> = (base..base + 2 * bits).map(QubitId).collect();
    wires.push(ancilla);
    wires
}

/// X gates on the bits where `id` has a 0, least significant bit first.
///
/// Conjugating a multi-controlled gate with this pattern makes the gate
/// fire exactly when the register holds `id`.
fn node_pattern(id: u32, bits: u32) -> MazeResult<Circuit> {
    let mut circuit = Circuit::with_size(format!("node_{id}_pattern"), bits, 0);
    for bit in 0..bits {
        if id & (1 << bit) == 0 {
            circuit.x(QubitId(bit))?;
        }
    }
    Ok(circuit)
}

/// Toggle the ancilla (qubit `2 * bits`) iff the two node registers
/// hold exactly `from` and `to`.
fn edge_match(from: u32, to: u32, bits: u32) -> MazeResult<Circuit> {
    let ancilla = QubitId(2 * bits);
    let mut circuit = Circuit::with_size(format!("edge_match_{from}_{to}"), 2 * bits + 1, 0);

    let from_pattern = node_pattern(from, bits)?;
    let to_pattern = node_pattern(to, bits)?;
    let first_reg: Vec<QubitId> = (0..bits).map(QubitId).collect();
    let second_reg: Vec<QubitId> = (bits..2 * bits).map(QubitId).collect();
    let controls: Vec<QubitId> = (0..2 * bits).map(QubitId).collect();

    circuit.append(&from_pattern, &first_reg)?;
    circuit.append(&to_pattern, &second_reg)?;
    circuit.mcx(&controls, ancilla)?;
    circuit.append(&to_pattern, &second_reg)?;
    circuit.append(&from_pattern, &first_reg)?;
    Ok(circuit)
}

/// OR over a directed pair list, realized as one ancilla toggle per
/// pair. At most one pair can match a given register assignment, which
/// is why duplicate pairs are rejected upstream.
fn edge_check(pairs: &[(u32, u32)], bits: u32) -> MazeResult<Circuit> {
    let width = 2 * bits + 1;
    let wires: Vec<QubitId> = (0..width).map(QubitId).collect();
    let mut circuit = Circuit::with_size("edge_check", width, 0);
    for &(from, to) in pairs {
        circuit.append(&edge_match(from, to, bits)?, &wires)?;
        circuit.barrier(wires.iter().copied())?;
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daedalus_ir::Gate;

    fn line_graph() -> Graph {
        Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 0, 3).unwrap()
    }

    #[test]
    fn test_node_pattern_flips_zero_bits() {
        // 5 = 0b101, so only bit 1 gets an X.
        let pattern = node_pattern(5, 3).unwrap();
        let qubits: Vec<_> = pattern.instructions().map(|i| i.qubits.clone()).collect();
        assert_eq!(qubits, vec![vec![QubitId(1)]]);

        let zero = node_pattern(0, 2).unwrap();
        assert_eq!(zero.gate_count(), 2);
    }

    #[test]
    fn test_edge_match_is_self_uncomputing() {
        let circuit = edge_match(1, 2, 2).unwrap();
        // X pattern, MCX, X pattern again: gate count is odd and the
        // non-MCX gates come in equal halves.
        let mcx_count = circuit
            .instructions()
            .filter(|i| i.as_gate() == Some(Gate::MCX))
            .count();
        assert_eq!(mcx_count, 1);
        assert_eq!(circuit.gate_count() % 2, 1);
    }

    #[test]
    fn test_directed_pair_expansion() {
        let graph = line_graph();
        let sizing = PathSizing::new(&graph, None).unwrap();
        let builder = OracleBuilder::new(&graph, sizing, false);
        let pairs = builder.directed_pairs().unwrap();
        // Three undirected edges doubled, plus the synthetic (3, 3).
        assert_eq!(pairs.len(), 7);
        assert!(pairs.contains(&(1, 0)));
        assert!(pairs.contains(&(3, 3)));
    }

    #[test]
    fn test_duplicate_directed_pair_rejected() {
        let mut graph = line_graph();
        graph.connect(0, 1).unwrap();
        let sizing = PathSizing::new(&graph, None).unwrap();
        let builder = OracleBuilder::new(&graph, sizing, false);
        assert!(matches!(
            builder.build(),
            Err(MazeError::DuplicateEdge { from: 0, to: 1 })
        ));
    }

    #[test]
    fn test_existing_end_self_loop_not_duplicated() {
        let graph = Graph::from_edges(&[(0, 1), (1, 1)], 0, 1).unwrap();
        let sizing = PathSizing::new(&graph, None).unwrap();
        let builder = OracleBuilder::new(&graph, sizing, false);
        let pairs = builder.directed_pairs().unwrap();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_oracle_width_and_ancilla_reset_structure() {
        let graph = line_graph();
        let sizing = PathSizing::new(&graph, None).unwrap();
        let builder = OracleBuilder::new(&graph, sizing, false);
        let oracle = builder.build().unwrap();

        // 8 path qubits + 3 edge ancillas.
        assert_eq!(oracle.num_qubits(), 11);

        // Exactly one phase gate, with compute and uncompute mirrored
        // around it.
        let mcz_count = oracle
            .instructions()
            .filter(|i| i.as_gate() == Some(Gate::MCZ))
            .count();
        assert_eq!(mcz_count, 1);
        let gates: Vec<_> = oracle
            .instructions()
            .filter(|i| i.is_gate())
            .collect();
        let mid = gates.len() / 2;
        assert_eq!(gates[mid].as_gate(), Some(Gate::MCZ));
        for (front, back) in gates[..mid].iter().zip(gates[mid + 1..].iter().rev()) {
            assert_eq!(front.qubits, back.qubits);
            assert_eq!(front.as_gate(), back.as_gate());
        }
    }

    #[test]
    fn test_turn_back_adds_ancillas() {
        let graph = line_graph();
        let sizing = PathSizing::new(&graph, None).unwrap();
        let plain = OracleBuilder::new(&graph, sizing, false).build().unwrap();
        let checked = OracleBuilder::new(&graph, sizing, true).build().unwrap();
        assert_eq!(plain.num_qubits(), 11);
        assert_eq!(checked.num_qubits(), 13);
        assert!(checked.gate_count() > plain.gate_count());
    }

    #[test]
    fn test_single_transition_uses_one_ancilla() {
        let graph = Graph::from_edges(&[(0, 1)], 0, 1).unwrap();
        let sizing = PathSizing::new(&graph, Some(1)).unwrap();
        let oracle = OracleBuilder::new(&graph, sizing, false).build().unwrap();

        // 2 path qubits + 1 ancilla; phase flip is a plain Z.
        assert_eq!(oracle.num_qubits(), 3);
        let z_count = oracle
            .instructions()
            .filter(|i| i.as_gate() == Some(Gate::Z))
            .count();
        assert_eq!(z_count, 1);
        // The (0, 1) match toggles once; (1, 1) idle match is filtered
        // out because the path must leave the start node.
        let mcx_count = oracle
            .instructions()
            .filter(|i| i.as_gate() == Some(Gate::MCX))
            .count();
        assert_eq!(mcx_count, 2);
    }
}
