//! Grover-style maze path search.
//!
//! Encodes bounded walks through a graph into a qubit register, compiles
//! a phase oracle that marks valid start-to-end walks, wraps it in
//! amplitude amplification, and decodes measured bitstrings back into
//! node sequences.
//!
//! The pipeline:
//!
//! ```text
//!   Graph ──→ PathSizing ──→ OracleBuilder ──→ SearchCircuit
//!                                                   │
//!                     Path ←── QuantumSolver ←── Backend
//! ```
//!
//! # Example
//!
//! ```
//! use daedalus_maze::{Graph, QuantumSolver, SearchCircuit, SearchOptions};
//! use daedalus_adapter_sim::SimulatorBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 0, 3)?;
//! let search = SearchCircuit::build(&graph, SearchOptions::default())?;
//!
//! let solver = QuantumSolver::new(SimulatorBackend::with_seed(7));
//! if let Some(path) = solver.most_frequent_path(&search, 64)? {
//!     println!("{path}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod bfs;
pub mod error;
pub mod generate;
pub mod graph;
pub mod grover;
pub mod maze;
pub mod oracle;
pub mod sizing;
pub mod solver;

pub use error::{MazeError, MazeResult};
pub use generate::PrimGenerator;
pub use graph::{Edge, Graph, Node};
pub use grover::{SearchCircuit, SearchOptions, diffusion_operator, grover_iterations};
pub use maze::Maze;
pub use oracle::OracleBuilder;
pub use sizing::{AncillaLayout, PathSizing};
pub use solver::{Path, QuantumSolver, decode_path};
