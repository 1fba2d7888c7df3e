//! Grid maze: a graph whose nodes are cells.
//!
//! A cell at `(x, y)` has id `y * width + x`. An edge between adjacent
//! cells is an open passage; the absence of an edge is a wall. The maze
//! owns its graph by composition and exposes it read-only.

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};
use crate::graph::{Graph, Node};

/// A rectangular grid maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    graph: Graph,
    width: u32,
    height: u32,
}

impl Maze {
    /// Create a maze with all walls closed, start at the top-left corner
    /// and end at the bottom-right corner.
    pub fn new(width: u32, height: u32) -> MazeResult<Self> {
        Self::with_endpoints(width, height, (0, 0), (width.wrapping_sub(1), height.wrapping_sub(1)))
    }

    /// Create a maze with explicit start/end cells.
    ///
    /// Both must lie on the grid boundary.
    pub fn with_endpoints(
        width: u32,
        height: u32,
        start: (u32, u32),
        end: (u32, u32),
    ) -> MazeResult<Self> {
        // Overflowed sizes are as unusable as empty ones.
        let cells = width.checked_mul(height).unwrap_or(0);
        if cells < 2 {
            return Err(MazeError::InvalidMazeSize { width, height });
        }
        if !on_boundary(width, height, start.0, start.1) {
            return Err(MazeError::StartOffBoundary {
                x: start.0,
                y: start.1,
            });
        }
        if !on_boundary(width, height, end.0, end.1) {
            return Err(MazeError::EndOffBoundary { x: end.0, y: end.1 });
        }

        let nodes = (0..cells).map(Node::new);
        let start_id = start.1 * width + start.0;
        let end_id = end.1 * width + end.0;
        let graph = Graph::new(nodes, Node::new(start_id), Node::new(end_id))?;

        Ok(Self {
            graph,
            width,
            height,
        })
    }

    /// Open the passage between two adjacent cells.
    pub fn open_passage(&mut self, a: u32, b: u32) -> MazeResult<()> {
        if !self.adjacent(a, b) {
            return Err(MazeError::CellsNotAdjacent { a, b });
        }
        self.graph.connect(a, b)
    }

    /// Close the passage between two adjacent cells.
    pub fn close_passage(&mut self, a: u32, b: u32) -> MazeResult<()> {
        if !self.adjacent(a, b) {
            return Err(MazeError::CellsNotAdjacent { a, b });
        }
        self.graph.disconnect(a, b)
    }

    /// The cell id at `(x, y)`.
    pub fn cell_id(&self, x: u32, y: u32) -> u32 {
        y * self.width + x
    }

    /// The `(x, y)` coordinates of a cell id.
    pub fn cell_coords(&self, id: u32) -> (u32, u32) {
        (id % self.width, id / self.width)
    }

    /// Ids of the in-grid 4-neighbors of a cell.
    pub fn neighbor_ids(&self, id: u32) -> Vec<u32> {
        let (x, y) = self.cell_coords(id);
        let mut neighbors = Vec::with_capacity(4);
        if x > 0 {
            neighbors.push(self.cell_id(x - 1, y));
        }
        if x + 1 < self.width {
            neighbors.push(self.cell_id(x + 1, y));
        }
        if y > 0 {
            neighbors.push(self.cell_id(x, y - 1));
        }
        if y + 1 < self.height {
            neighbors.push(self.cell_id(x, y + 1));
        }
        neighbors
    }

    fn adjacent(&self, a: u32, b: u32) -> bool {
        a < self.width * self.height && self.neighbor_ids(a).contains(&b)
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consume the maze, yielding the graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }
}

fn on_boundary(width: u32, height: u32, x: u32, y: u32) -> bool {
    x < width && y < height && (x == 0 || x == width - 1 || y == 0 || y == height - 1)
}
