//! Randomized maze generation.
//!
//! Generators take the RNG as an explicit argument so two calls with the
//! same seed produce the same maze; nothing here touches process-global
//! random state.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::error::MazeResult;
use crate::maze::Maze;

/// Randomized-Prim maze generator.
///
/// Grows a spanning tree from the start cell by repeatedly opening a
/// random frontier passage into an unvisited cell. The result is a
/// perfect maze: every cell reachable, exactly `cells - 1` passages,
/// a unique simple path between any two cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimGenerator;

impl PrimGenerator {
    /// Generate a maze with default corner endpoints.
    pub fn generate(&self, width: u32, height: u32, rng: &mut impl Rng) -> MazeResult<Maze> {
        let mut maze = Maze::new(width, height)?;

        let start_id = maze.graph().start().id();
        let mut visited = FxHashSet::default();
        visited.insert(start_id);

        // Frontier of (visited cell, unvisited neighbor) passages.
        let mut frontier: Vec<(u32, u32)> = maze
            .neighbor_ids(start_id)
            .into_iter()
            .map(|n| (start_id, n))
            .collect();

        while !frontier.is_empty() {
            let idx = rng.gen_range(0..frontier.len());
            let (from, to) = frontier.swap_remove(idx);
            if visited.contains(&to) {
                continue;
            }
            maze.open_passage(from, to)?;
            visited.insert(to);
            for n in maze.neighbor_ids(to) {
                if !visited.contains(&n) {
                    frontier.push((to, n));
                }
            }
        }

        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spanning_tree_edge_count() {
        let mut rng = StdRng::seed_from_u64(11);
        let maze = PrimGenerator.generate(4, 4, &mut rng).unwrap();
        assert_eq!(maze.graph().edges().len(), 15);
    }

    #[test]
    fn test_end_reachable_from_start() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = PrimGenerator.generate(5, 4, &mut rng).unwrap();
            let path = bfs::shortest_path(maze.graph());
            assert!(path.is_some(), "seed {seed} produced unreachable end");
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = PrimGenerator.generate(6, 6, &mut rng_a).unwrap();
        let b = PrimGenerator.generate(6, 6, &mut rng_b).unwrap();
        assert_eq!(a.graph().edges(), b.graph().edges());
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let a = PrimGenerator.generate(6, 6, &mut rng_a).unwrap();
        let b = PrimGenerator.generate(6, 6, &mut rng_b).unwrap();
        assert_ne!(a.graph().edges(), b.graph().edges());
    }
}
