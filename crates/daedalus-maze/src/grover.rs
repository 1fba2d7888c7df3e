//! Amplitude amplification: diffusion operator, iteration count, and
//! assembly of the full search circuit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use daedalus_ir::{Circuit, ClbitId, QubitId};

use crate::error::{MazeError, MazeResult};
use crate::graph::Graph;
use crate::oracle::OracleBuilder;
use crate::sizing::PathSizing;

/// Inversion about the mean on `n` qubits.
///
/// The standard H / X conjugation of a multi-controlled Z. On a single
/// qubit the controlled form degenerates to a plain Z.
pub fn diffusion_operator(n: u32) -> MazeResult<Circuit> {
    let mut circuit = Circuit::with_size("diffusion", n, 0);
    let qubits: Vec<QubitId> = (0..n).map(QubitId).collect();

    for &q in &qubits {
        circuit.h(q)?;
    }
    for &q in &qubits {
        circuit.x(q)?;
    }
    match qubits.split_last() {
        Some((&target, [])) => {
            circuit.z(target)?;
        }
        Some((&target, controls)) => {
            circuit.mcz(controls, target)?;
        }
        None => {}
    }
    for &q in &qubits {
        circuit.x(q)?;
    }
    for &q in &qubits {
        circuit.h(q)?;
    }
    Ok(circuit)
}

/// Grover iteration count for `n` search qubits and an estimated
/// `num_solutions` marked states: `ceil(pi/4 * sqrt(2^n / M))`.
pub fn grover_iterations(num_search_qubits: u32, num_solutions: u64) -> MazeResult<u32> {
    if num_solutions == 0 {
        return Err(MazeError::InvalidSolutionCount);
    }
    let ratio = f64::exp2(f64::from(num_search_qubits)) / num_solutions as f64;
    Ok(((std::f64::consts::PI / 4.0) * ratio.sqrt()).ceil() as u32)
}

/// Tunable knobs for [`SearchCircuit::build`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Bound on path transitions; `None` means `total_nodes - 1`.
    pub max_path_length: Option<u32>,
    /// Enable the turn-back ancilla bank.
    pub turn_back_check: bool,
    /// Estimated number of marked states, for the iteration count.
    pub num_solutions: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_path_length: None,
            turn_back_check: false,
            num_solutions: 1,
        }
    }
}

/// A compiled maze search: the circuit plus everything needed to read
/// its measurement outcomes back as paths.
#[derive(Debug, Clone)]
pub struct SearchCircuit {
    circuit: Circuit,
    graph: Graph,
    sizing: PathSizing,
    iterations: u32,
}

impl SearchCircuit {
    /// Compile the full search circuit for a graph.
    ///
    /// Uniform superposition over the path register, then the oracle and
    /// diffusion repeated for the computed iteration count, then a
    /// measurement of every path qubit onto the classical bit of the
    /// same index.
    pub fn build(graph: &Graph, options: SearchOptions) -> MazeResult<Self> {
        let sizing = PathSizing::new(graph, options.max_path_length)?;
        let builder = OracleBuilder::new(graph, sizing, options.turn_back_check);
        let oracle = builder.build()?;

        let num_path_qubits = sizing.num_path_qubits();
        let total_qubits = oracle.num_qubits();
        let iterations = grover_iterations(num_path_qubits, options.num_solutions)?;

        let path_qubits: Vec<QubitId> = (0..num_path_qubits).map(QubitId).collect();
        let all_qubits: Vec<QubitId> = (0..total_qubits).map(QubitId).collect();
        let diffusion = diffusion_operator(num_path_qubits)?;

        let mut circuit = Circuit::with_size("maze_search", total_qubits, num_path_qubits);
        for &q in &path_qubits {
            circuit.h(q)?;
        }
        for _ in 0..iterations {
            circuit.barrier(all_qubits.iter().copied())?;
            circuit.append(&oracle, &all_qubits)?;
            circuit.append(&diffusion, &path_qubits)?;
        }
        for &q in &path_qubits {
            circuit.measure(q, ClbitId(q.0))?;
        }

        debug!(
            total_qubits,
            num_path_qubits,
            iterations,
            gates = circuit.gate_count(),
            "assembled maze search circuit"
        );
        Ok(Self {
            circuit,
            graph: graph.clone(),
            sizing,
            iterations,
        })
    }

    /// The assembled circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The graph this circuit searches.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The register sizing the circuit was compiled against.
    pub fn sizing(&self) -> PathSizing {
        self.sizing
    }

    /// Number of oracle-plus-diffusion rounds in the circuit.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}
