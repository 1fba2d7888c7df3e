//! Outcome decoding and the backend-driving solver.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use daedalus_hal::{Backend, Counts};

use crate::error::{MazeError, MazeResult};
use crate::grover::SearchCircuit;
use crate::sizing::PathSizing;

/// A walk through the graph, as a node-id sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Path(Vec<u32>);

impl Path {
    /// Wrap a node sequence.
    pub fn new(nodes: Vec<u32>) -> Self {
        Self(nodes)
    }

    /// The node ids in walk order.
    pub fn nodes(&self) -> &[u32] {
        &self.0
    }

    /// Number of nodes in the walk.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the walk is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The same walk with every cycle cut out.
    ///
    /// Revisiting a node means everything walked since its first visit
    /// was a detour; the walk rolls back to that first visit and
    /// continues from there. Trailing end-node repeats collapse too,
    /// since they are self-loop cycles of length one.
    pub fn remove_cycles(&self) -> Path {
        let mut reduced: Vec<u32> = Vec::with_capacity(self.0.len());
        for &node in &self.0 {
            if let Some(pos) = reduced.iter().position(|&n| n == node) {
                reduced.truncate(pos + 1);
            } else {
                reduced.push(node);
            }
        }
        Path(reduced)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.0 {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        Ok(())
    }
}

/// Decode one measured bitstring into a path.
///
/// The outcome covers the path register exactly, rightmost character
/// first. Splitting it left to right into per-node chunks therefore
/// yields the LAST path position first; pushing each decoded node to
/// the front restores walk order.
pub fn decode_path(outcome: &str, sizing: &PathSizing) -> MazeResult<Path> {
    let expected = sizing.num_path_qubits() as usize;
    if outcome.len() != expected {
        return Err(MazeError::OutcomeLengthMismatch {
            expected,
            got: outcome.len(),
        });
    }
    // Chunks are sliced at byte offsets, so reject multi-byte characters
    // before they can land a cut inside one.
    if !outcome.is_ascii() {
        return Err(MazeError::OutcomeNotBinary(outcome.to_string()));
    }

    let bits = sizing.bits_per_node() as usize;
    let mut nodes = Vec::with_capacity(sizing.num_nodes_in_path() as usize);
    let mut rest = outcome;
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(bits);
        let id = u32::from_str_radix(chunk, 2)
            .map_err(|_| MazeError::OutcomeNotBinary(chunk.to_string()))?;
        nodes.insert(0, id);
        rest = tail;
    }
    Ok(Path(nodes))
}

/// Runs a compiled search circuit on a backend and decodes the results.
#[derive(Debug)]
pub struct QuantumSolver<B: Backend> {
    backend: B,
}

impl<B: Backend> QuantumSolver<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the circuit and return raw outcome counts.
    pub fn run(&self, search: &SearchCircuit, shots: u32) -> MazeResult<Counts> {
        let executable = self.backend.compile(search.circuit())?;
        let memory = self.backend.run(&executable, shots)?;
        debug!(
            backend = self.backend.name(),
            shots,
            distinct = memory.len(),
            "maze search executed"
        );
        Ok(Counts::from_memory(&memory))
    }

    /// Run the circuit and decode every trial into a path, in shot order.
    ///
    /// Decode failures are per-trial: a malformed outcome yields an error
    /// in its slot and the remaining trials are still returned.
    pub fn solve(&self, search: &SearchCircuit, shots: u32) -> MazeResult<Vec<MazeResult<Path>>> {
        let executable = self.backend.compile(search.circuit())?;
        let memory = self.backend.run(&executable, shots)?;
        let sizing = search.sizing();
        Ok(memory
            .iter()
            .map(|outcome| decode_path(outcome, &sizing))
            .collect())
    }

    /// Run the circuit and return the cycle-reduced decoding of the most
    /// frequent outcome. `None` when the backend returns no trials.
    pub fn most_frequent_path(
        &self,
        search: &SearchCircuit,
        shots: u32,
    ) -> MazeResult<Option<Path>> {
        let counts = self.run(search, shots)?;
        match counts.most_frequent() {
            Some((outcome, hits)) => {
                let path = decode_path(outcome, &search.sizing())?;
                let reduced = path.remove_cycles();
                debug!(%outcome, hits, path = %reduced, "decoded most frequent outcome");
                Ok(Some(reduced))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use proptest::prelude::*;

    fn sizing_4_nodes() -> PathSizing {
        let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 0, 3).unwrap();
        PathSizing::new(&graph, None).unwrap()
    }

    #[test]
    fn test_decode_walk_order() {
        let sizing = sizing_4_nodes();
        // Registers hold 0, 1, 2, 3; clbit order puts the last register
        // leftmost.
        let path = decode_path("11100100", &sizing).unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_decode_idle_at_end() {
        let sizing = sizing_4_nodes();
        // 0 -> 3 -> 3 -> 3 via the end self-loop.
        let path = decode_path("11111100", &sizing).unwrap();
        assert_eq!(path.nodes(), &[0, 3, 3, 3]);
        assert_eq!(path.remove_cycles().nodes(), &[0, 3]);
    }

    #[test]
    fn test_decode_length_mismatch() {
        let sizing = sizing_4_nodes();
        assert!(matches!(
            decode_path("1110010", &sizing),
            Err(MazeError::OutcomeLengthMismatch {
                expected: 8,
                got: 7
            })
        ));
    }

    #[test]
    fn test_decode_non_binary() {
        let sizing = sizing_4_nodes();
        assert!(matches!(
            decode_path("11100x00", &sizing),
            Err(MazeError::OutcomeNotBinary(_))
        ));
        // Multi-byte characters must error out, not panic when a chunk
        // boundary falls inside one. 8 bytes, so the length guard passes.
        assert!(matches!(
            decode_path("0\u{00bc}0\u{00bc}00", &sizing),
            Err(MazeError::OutcomeNotBinary(_))
        ));
    }

    #[test]
    fn test_remove_cycles_rolls_back_detours() {
        let path = Path::new(vec![0, 1, 2, 1, 3]);
        assert_eq!(path.remove_cycles().nodes(), &[0, 1, 3]);

        let nested = Path::new(vec![0, 1, 2, 3, 1, 2, 0, 2]);
        assert_eq!(nested.remove_cycles().nodes(), &[0, 2]);

        let clean = Path::new(vec![0, 1, 2, 3]);
        assert_eq!(clean.remove_cycles().nodes(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_path_display() {
        let path = Path::new(vec![0, 4, 2]);
        assert_eq!(path.to_string(), "0 -> 4 -> 2");
        assert_eq!(Path::new(vec![]).to_string(), "");
    }

    proptest! {
        #[test]
        fn prop_node_id_round_trip(
            (total, ids) in (2u32..200).prop_flat_map(|n| {
                (Just(n), proptest::collection::vec(0..n, 2..6))
            })
        ) {
            let edges: Vec<(u32, u32)> = (0..total - 1).map(|i| (i, i + 1)).collect();
            let graph = Graph::from_edges(&edges, 0, total - 1).unwrap();
            let sizing = PathSizing::new(&graph, Some(ids.len() as u32 - 1)).unwrap();

            // Encode per the wire convention: leftmost chunk is the last
            // path position, most significant bit first within a chunk.
            let bits = sizing.bits_per_node() as usize;
            let outcome: String = ids
                .iter()
                .rev()
                .map(|id| format!("{:0w$b}", id, w = bits))
                .collect();

            let path = decode_path(&outcome, &sizing).unwrap();
            prop_assert_eq!(path.nodes(), ids.as_slice());
        }
    }
}
