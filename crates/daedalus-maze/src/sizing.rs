//! Register sizing for the path encoding.
//!
//! A candidate path is a fixed-length sequence of node ids, each packed
//! into `bits_per_node` qubits. Node register `s` occupies qubits
//! `s * bits_per_node .. (s + 1) * bits_per_node`, least significant
//! bit first within the register.

use serde::{Deserialize, Serialize};

use daedalus_ir::QubitId;

use crate::error::{MazeError, MazeResult};
use crate::graph::Graph;

/// Derived qubit-register dimensions for one search problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSizing {
    total_nodes: usize,
    bits_per_node: u32,
    max_path_length: u32,
    num_nodes_in_path: u32,
    num_path_qubits: u32,
}

impl PathSizing {
    /// Derive sizing from a graph and an optional path-length bound.
    ///
    /// The bound counts transitions; `None` defaults to `total_nodes - 1`,
    /// enough for any simple path. Every node id must be representable in
    /// the derived per-node bit width.
    pub fn new(graph: &Graph, max_path_length: Option<u32>) -> MazeResult<Self> {
        let total_nodes = graph.total_nodes();
        if total_nodes < 2 {
            return Err(MazeError::TooFewNodes(total_nodes));
        }

        let bits_per_node = 32 - (total_nodes as u32 - 1).leading_zeros();

        let max_path_length = match max_path_length {
            Some(0) => return Err(MazeError::InvalidPathLength),
            Some(bound) => bound,
            None => total_nodes as u32 - 1,
        };

        let max_id = graph.max_node_id();
        if bits_per_node < 32 && max_id >= 1 << bits_per_node {
            return Err(MazeError::NodeIdOutOfRange {
                id: max_id,
                bits_per_node,
            });
        }

        let num_nodes_in_path = max_path_length + 1;
        Ok(Self {
            total_nodes,
            bits_per_node,
            max_path_length,
            num_nodes_in_path,
            num_path_qubits: num_nodes_in_path * bits_per_node,
        })
    }

    /// Number of nodes in the graph.
    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// Qubits per node register.
    pub fn bits_per_node(&self) -> u32 {
        self.bits_per_node
    }

    /// Maximum number of transitions in a candidate path.
    pub fn max_path_length(&self) -> u32 {
        self.max_path_length
    }

    /// Number of node registers, one more than the transition count.
    pub fn num_nodes_in_path(&self) -> u32 {
        self.num_nodes_in_path
    }

    /// Total qubits in the path register.
    pub fn num_path_qubits(&self) -> u32 {
        self.num_path_qubits
    }

    /// The qubits of node register `s`, least significant bit first.
    pub fn node_register(&self, s: u32) -> Vec<QubitId> {
        let base = s * self.bits_per_node;
        (base..base + self.bits_per_node).map(QubitId).collect()
    }
}

/// Ancilla placement above the path register.
///
/// One edge-validity ancilla per transition, then one turn-back ancilla
/// per interior path position when that check is enabled.
#[derive(Debug, Clone, Copy)]
pub struct AncillaLayout {
    num_path_qubits: u32,
    max_path_length: u32,
    turn_back_check: bool,
}

impl AncillaLayout {
    /// Lay out ancillas for a sized problem.
    pub fn new(sizing: &PathSizing, turn_back_check: bool) -> Self {
        Self {
            num_path_qubits: sizing.num_path_qubits(),
            max_path_length: sizing.max_path_length(),
            turn_back_check,
        }
    }

    /// Ancilla recording validity of transition `t`.
    pub fn edge_ancilla(&self, t: u32) -> QubitId {
        QubitId(self.num_path_qubits + t)
    }

    /// Ancilla recording the turn-back check at interior position `1 + i`.
    pub fn turn_back_ancilla(&self, i: u32) -> QubitId {
        QubitId(self.num_path_qubits + self.max_path_length + i)
    }

    /// Number of turn-back ancillas, zero when the check is disabled.
    pub fn num_turn_back_ancillas(&self) -> u32 {
        if self.turn_back_check {
            self.max_path_length.saturating_sub(1)
        } else {
            0
        }
    }

    /// Total ancilla count.
    pub fn num_ancillas(&self) -> u32 {
        self.max_path_length + self.num_turn_back_ancillas()
    }

    /// Path qubits plus ancillas.
    pub fn total_qubits(&self) -> u32 {
        self.num_path_qubits + self.num_ancillas()
    }

    /// All ancilla qubits, edge ancillas first.
    pub fn ancilla_qubits(&self) -> Vec<QubitId> {
        (self.num_path_qubits..self.total_qubits())
            .map(QubitId)
            .collect()
    }
}
