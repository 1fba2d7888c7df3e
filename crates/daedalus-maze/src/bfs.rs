//! Classical breadth-first shortest path.
//!
//! Used as a reference solver in tests and to pick a tight path-length
//! bound before sizing the quantum register.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::graph::Graph;

/// Shortest path from the graph's start to its end, as a node-id
/// sequence including both endpoints. `None` if the end is unreachable.
pub fn shortest_path(graph: &Graph) -> Option<Vec<u32>> {
    let start = graph.start().id();
    let end = graph.end().id();
    if start == end {
        return Some(vec![start]);
    }

    let mut adjacency: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
    for edge in graph.edges() {
        if edge.is_self_loop() {
            continue;
        }
        let (a, b) = (edge.start().id(), edge.end().id());
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }

    let mut parent: FxHashMap<u32, u32> = FxHashMap::default();
    let mut queue = VecDeque::from([start]);
    parent.insert(start, start);

    while let Some(node) = queue.pop_front() {
        if node == end {
            let mut path = vec![end];
            let mut cursor = end;
            while cursor != start {
                cursor = parent[&cursor];
                path.push(cursor);
            }
            path.reverse();
            return Some(path);
        }
        if let Some(neighbors) = adjacency.get(&node) {
            for &next in neighbors {
                if !parent.contains_key(&next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_graph() {
        let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 0, 3).unwrap();
        assert_eq!(shortest_path(&graph), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_prefers_shorter_branch() {
        // 0 -> 3 directly or via 1 -> 2.
        let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3), (0, 3)], 0, 3).unwrap();
        assert_eq!(shortest_path(&graph), Some(vec![0, 3]));
    }

    #[test]
    fn test_unreachable_end() {
        let graph = Graph::from_edges(&[(0, 1), (2, 3)], 0, 3).unwrap();
        assert_eq!(shortest_path(&graph), None);
    }

    #[test]
    fn test_start_equals_end() {
        let graph = Graph::from_edges(&[(0, 1)], 0, 0).unwrap();
        assert_eq!(shortest_path(&graph), Some(vec![0]));
    }
}
