//! Error types for the maze search core.
//!
//! Configuration and encoding errors are structural: they surface at
//! construction time, before any circuit exists. Decode errors are
//! per-trial: one malformed outcome does not invalidate the other
//! trials of a run.

use thiserror::Error;

/// Errors that can occur in the maze search core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MazeError {
    // --- Configuration ---
    /// Start node is not a member of the graph's node set.
    #[error("Start node {0} is not in the graph")]
    StartNotInGraph(u32),

    /// End node is not a member of the graph's node set.
    #[error("End node {0} is not in the graph")]
    EndNotInGraph(u32),

    /// Maze start cell is not on the grid boundary.
    #[error("Start cell ({x}, {y}) must be on the maze boundary")]
    StartOffBoundary {
        /// Cell x coordinate.
        x: u32,
        /// Cell y coordinate.
        y: u32,
    },

    /// Maze end cell is not on the grid boundary.
    #[error("End cell ({x}, {y}) must be on the maze boundary")]
    EndOffBoundary {
        /// Cell x coordinate.
        x: u32,
        /// Cell y coordinate.
        y: u32,
    },

    /// Grid too small to hold distinct start and end cells.
    #[error("Maze of {width}x{height} cells is too small")]
    InvalidMazeSize {
        /// Grid width in cells.
        width: u32,
        /// Grid height in cells.
        height: u32,
    },

    /// Referenced node does not exist in the graph.
    #[error("Node {0} not found in the graph")]
    NodeNotFound(u32),

    /// Referenced edge does not exist in the graph.
    #[error("No edge between nodes {a} and {b}")]
    EdgeNotFound {
        /// One endpoint.
        a: u32,
        /// The other endpoint.
        b: u32,
    },

    /// Cells are not grid neighbors.
    #[error("Cells {a} and {b} are not adjacent")]
    CellsNotAdjacent {
        /// One cell id.
        a: u32,
        /// The other cell id.
        b: u32,
    },

    /// Path-length bound must be at least 1.
    #[error("Maximum path length must be at least 1")]
    InvalidPathLength,

    /// Solution-count estimate must be at least 1.
    #[error("Solution count estimate must be at least 1")]
    InvalidSolutionCount,

    // --- Encoding ---
    /// Too few nodes to derive a nonzero bit width.
    #[error("Graph has {0} nodes, need at least 2 to encode a path")]
    TooFewNodes(usize),

    /// A node id does not fit the derived bit width.
    #[error("Node id {id} is not representable in {bits_per_node} bits")]
    NodeIdOutOfRange {
        /// The offending node id.
        id: u32,
        /// The derived per-node bit width.
        bits_per_node: u32,
    },

    /// Duplicate directed edge violates the shared-ancilla OR precondition.
    #[error("Duplicate directed edge {from} -> {to}")]
    DuplicateEdge {
        /// Edge source node id.
        from: u32,
        /// Edge target node id.
        to: u32,
    },

    // --- Decode ---
    /// Measured outcome does not cover the path register exactly.
    #[error("Outcome has {got} bits, expected {expected} path-encoding bits")]
    OutcomeLengthMismatch {
        /// Expected number of bits.
        expected: usize,
        /// Observed number of bits.
        got: usize,
    },

    /// Outcome contains non-binary characters.
    #[error("Outcome chunk '{0}' is not a binary string")]
    OutcomeNotBinary(String),

    // --- Propagated ---
    /// Circuit construction error.
    #[error(transparent)]
    Ir(#[from] daedalus_ir::IrError),

    /// Backend error.
    #[error(transparent)]
    Hal(#[from] daedalus_hal::HalError),
}

/// Result type for maze search operations.
pub type MazeResult<T> = Result<T, MazeError>;
