//! Graph model: nodes, undirected edges, designated endpoints.
//!
//! The graph is built once by a generator and is read-only for the rest
//! of the pipeline. Edges are stored once per passage; the oracle
//! compiler materializes both directed orientations when it needs them.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{MazeError, MazeResult};

/// An identity-only graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    id: u32,
}

impl Node {
    /// Create a node with the given id.
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// The node id.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.id)
    }
}

/// An unordered pair of nodes.
///
/// Equality and hashing are symmetric: `Edge(a, b) == Edge(b, a)`.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Edge {
    start: Node,
    end: Node,
}

impl Edge {
    /// Create an edge between two nodes.
    pub fn new(start: Node, end: Node) -> Self {
        Self { start, end }
    }

    /// One endpoint, in stored orientation.
    pub fn start(&self) -> Node {
        self.start
    }

    /// The other endpoint, in stored orientation.
    pub fn end(&self) -> Node {
        self.end
    }

    /// Whether this edge is a self-loop.
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Orientation-independent, to agree with the symmetric equality.
        let (lo, hi) = if self.start.id() <= self.end.id() {
            (self.start.id(), self.end.id())
        } else {
            (self.end.id(), self.start.id())
        };
        lo.hash(state);
        hi.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.start, self.end)
    }
}

/// An undirected graph with designated start and end nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    nodes: FxHashSet<Node>,
    edges: Vec<Edge>,
    start: Node,
    end: Node,
}

impl Graph {
    /// Create a graph with no edges.
    ///
    /// Fails if either endpoint is not in the node set.
    pub fn new(
        nodes: impl IntoIterator<Item = Node>,
        start: Node,
        end: Node,
    ) -> MazeResult<Self> {
        let nodes: FxHashSet<Node> = nodes.into_iter().collect();
        if !nodes.contains(&start) {
            return Err(MazeError::StartNotInGraph(start.id()));
        }
        if !nodes.contains(&end) {
            return Err(MazeError::EndNotInGraph(end.id()));
        }
        Ok(Self {
            nodes,
            edges: vec![],
            start,
            end,
        })
    }

    /// Build a graph from undirected (from, to) id pairs.
    ///
    /// The node set is the union of all endpoint ids.
    pub fn from_edges(edges: &[(u32, u32)], start: u32, end: u32) -> MazeResult<Self> {
        let nodes = edges
            .iter()
            .flat_map(|&(a, b)| [Node::new(a), Node::new(b)]);
        let mut graph = Self::new(nodes, Node::new(start), Node::new(end))?;
        for &(a, b) in edges {
            graph.connect(a, b)?;
        }
        Ok(graph)
    }

    /// Add an undirected edge between two existing nodes.
    pub fn connect(&mut self, a: u32, b: u32) -> MazeResult<()> {
        let a = self.node_by_id(a)?;
        let b = self.node_by_id(b)?;
        self.edges.push(Edge::new(a, b));
        Ok(())
    }

    /// Remove the edge between two nodes.
    pub fn disconnect(&mut self, a: u32, b: u32) -> MazeResult<()> {
        let edge = Edge::new(self.node_by_id(a)?, self.node_by_id(b)?);
        match self.edges.iter().position(|e| *e == edge) {
            Some(idx) => {
                self.edges.remove(idx);
                Ok(())
            }
            None => Err(MazeError::EdgeNotFound { a, b }),
        }
    }

    /// Look up a node by id.
    pub fn node_by_id(&self, id: u32) -> MazeResult<Node> {
        let node = Node::new(id);
        if self.nodes.contains(&node) {
            Ok(node)
        } else {
            Err(MazeError::NodeNotFound(id))
        }
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: u32) -> bool {
        self.nodes.contains(&Node::new(id))
    }

    /// The designated start node.
    pub fn start(&self) -> Node {
        self.start
    }

    /// The designated end node.
    pub fn end(&self) -> Node {
        self.end
    }

    /// Iterate over the node set (unordered).
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().copied()
    }

    /// The edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes in the graph.
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The largest node id present.
    pub fn max_node_id(&self) -> u32 {
        self.nodes.iter().map(Node::id).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_equality_by_id() {
        assert_eq!(Node::new(3), Node::new(3));
        assert_ne!(Node::new(3), Node::new(4));
    }

    #[test]
    fn test_edge_symmetric_equality() {
        let ab = Edge::new(Node::new(0), Node::new(1));
        let ba = Edge::new(Node::new(1), Node::new(0));
        assert_eq!(ab, ba);

        let mut set = FxHashSet::default();
        set.insert(ab);
        assert!(set.contains(&ba));
    }

    #[test]
    fn test_graph_endpoint_validation() {
        let nodes = [Node::new(0), Node::new(1)];
        let err = Graph::new(nodes, Node::new(0), Node::new(9)).unwrap_err();
        assert!(matches!(err, MazeError::EndNotInGraph(9)));

        let err = Graph::new(nodes, Node::new(9), Node::new(1)).unwrap_err();
        assert!(matches!(err, MazeError::StartNotInGraph(9)));
    }

    #[test]
    fn test_from_edges() {
        let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 0, 3).unwrap();
        assert_eq!(graph.total_nodes(), 4);
        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.start().id(), 0);
        assert_eq!(graph.end().id(), 3);
        assert_eq!(graph.max_node_id(), 3);
    }

    #[test]
    fn test_connect_unknown_node() {
        let mut graph = Graph::from_edges(&[(0, 1)], 0, 1).unwrap();
        assert!(matches!(
            graph.connect(0, 5),
            Err(MazeError::NodeNotFound(5))
        ));
    }

    #[test]
    fn test_disconnect_either_orientation() {
        let mut graph = Graph::from_edges(&[(0, 1)], 0, 1).unwrap();
        graph.disconnect(1, 0).unwrap();
        assert!(graph.edges().is_empty());
        assert!(matches!(
            graph.disconnect(0, 1),
            Err(MazeError::EdgeNotFound { .. })
        ));
    }
}
