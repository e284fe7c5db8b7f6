//! Dijkstra shortest-path search.
//!
//! # Algorithm
//!
//! Binary-heap Dijkstra with lazy deletion of stale heap entries. Edges with
//! infinite, NaN, or negative distance are treated as impassable.
//!
//! # Tie-breaking
//!
//! Heap entries with equal tentative distance pop in ascending name order,
//! and a node's predecessor is only replaced by a strictly shorter path, so
//! results are identical across runs.
//!
//! # Complexity
//!
//! O((V + E) log V).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use serde::{Deserialize, Serialize};

use super::Graph;

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Location names from start to end inclusive.
    ///
    /// When the end is unreachable this is `[end]` only.
    pub path: Vec<String>,
    /// Total distance in km; `f64::INFINITY` when unreachable.
    pub distance: f64,
}

impl ShortestPath {
    fn unreachable(end: &str) -> Self {
        Self {
            path: vec![end.to_string()],
            distance: f64::INFINITY,
        }
    }

    /// Returns `true` if a path was found.
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate<'a> {
    distance: f64,
    node: &'a str,
}

impl Eq for Candidate<'_> {}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the shortest path from `start` to `end`.
///
/// The graph is taken as-is; callers that simulate a disruption fork and
/// mutate it first. `start == end` always yields distance 0.
///
/// # Examples
///
/// ```
/// use sc_twin::network::{demo_graph, shortest_path};
///
/// let g = demo_graph();
/// let sp = shortest_path(&g, "New Delhi", "Jaipur");
/// assert_eq!(sp.distance, 280.0);
/// assert_eq!(sp.path, vec!["New Delhi", "Jaipur"]);
/// ```
pub fn shortest_path(graph: &Graph, start: &str, end: &str) -> ShortestPath {
    if start == end {
        return ShortestPath {
            path: vec![start.to_string()],
            distance: 0.0,
        };
    }
    let Some(start) = graph.key(start) else {
        return ShortestPath::unreachable(end);
    };

    let mut dist: BTreeMap<&str, f64> = BTreeMap::new();
    let mut prev: BTreeMap<&str, &str> = BTreeMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(start, 0.0);
    heap.push(Candidate {
        distance: 0.0,
        node: start,
    });

    while let Some(Candidate { distance, node }) = heap.pop() {
        if node == end {
            break;
        }
        if distance > dist.get(node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }
        for edge in graph.edges(node) {
            if !edge.distance.is_finite() || edge.distance < 0.0 {
                continue;
            }
            let next = distance + edge.distance;
            let to = edge.to.as_str();
            if next < dist.get(to).copied().unwrap_or(f64::INFINITY) {
                dist.insert(to, next);
                prev.insert(to, node);
                heap.push(Candidate {
                    distance: next,
                    node: to,
                });
            }
        }
    }

    let Some(&distance) = dist.get(end) else {
        return ShortestPath::unreachable(end);
    };

    let mut path = vec![end.to_string()];
    let mut current = end;
    while let Some(&p) = prev.get(current) {
        path.push(p.to_string());
        current = p;
    }
    path.reverse();

    ShortestPath { path, distance }
}

/// Chains shortest paths through `waypoints` in order.
///
/// Unreachable if any leg is; the sentinel path is then `[last waypoint]`.
/// Fewer than two waypoints yield a zero-length path.
pub fn route_through(graph: &Graph, waypoints: &[&str]) -> ShortestPath {
    let Some((&first, rest)) = waypoints.split_first() else {
        return ShortestPath {
            path: Vec::new(),
            distance: 0.0,
        };
    };
    let mut path = vec![first.to_string()];
    let mut distance = 0.0;
    let mut from = first;
    for &to in rest {
        let leg = shortest_path(graph, from, to);
        if !leg.is_reachable() {
            let last = waypoints.last().copied().unwrap_or(to);
            return ShortestPath::unreachable(last);
        }
        distance += leg.distance;
        path.extend(leg.path.into_iter().skip(1));
        from = to;
    }
    ShortestPath { path, distance }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // A → B → D (1 + 1) and A → C → D (1 + 1): equal-cost tie
        let mut g = Graph::new();
        g.add_edge("A", "C", 1.0);
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "D", 1.0);
        g.add_edge("C", "D", 1.0);
        g.add_edge("A", "D", 5.0);
        g
    }

    #[test]
    fn test_same_node() {
        let g = diamond();
        let sp = shortest_path(&g, "A", "A");
        assert_eq!(sp.distance, 0.0);
        assert_eq!(sp.path, vec!["A"]);
    }

    #[test]
    fn test_same_node_not_in_graph() {
        let sp = shortest_path(&Graph::new(), "Q", "Q");
        assert_eq!(sp.distance, 0.0);
    }

    #[test]
    fn test_prefers_multi_hop() {
        let g = diamond();
        let sp = shortest_path(&g, "A", "D");
        assert!((sp.distance - 2.0).abs() < 1e-10);
        assert_eq!(sp.path.len(), 3);
    }

    #[test]
    fn test_tie_break_deterministic() {
        let g = diamond();
        let first = shortest_path(&g, "A", "D");
        for _ in 0..10 {
            assert_eq!(shortest_path(&g, "A", "D"), first);
        }
        // "B" pops before "C" at equal distance and claims D first.
        assert_eq!(first.path, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_unreachable() {
        let g = diamond();
        let sp = shortest_path(&g, "D", "A");
        assert!(sp.distance.is_infinite());
        assert_eq!(sp.path, vec!["A"]);
        assert!(!sp.is_reachable());
    }

    #[test]
    fn test_unknown_start() {
        let g = diamond();
        let sp = shortest_path(&g, "Nowhere", "D");
        assert!(sp.distance.is_infinite());
        assert_eq!(sp.path, vec!["D"]);
    }

    #[test]
    fn test_blocked_edge_is_skipped() {
        let mut g = diamond();
        g.block_edge("A", "B");
        g.block_edge("C", "D");
        let sp = shortest_path(&g, "A", "D");
        assert!((sp.distance - 5.0).abs() < 1e-10);
        assert_eq!(sp.path, vec!["A", "D"]);
    }

    #[test]
    fn test_stale_entries_ignored() {
        let mut g = Graph::new();
        g.add_edge("S", "X", 10.0);
        g.add_edge("S", "Y", 1.0);
        g.add_edge("Y", "X", 1.0);
        g.add_edge("X", "T", 1.0);
        let sp = shortest_path(&g, "S", "T");
        assert!((sp.distance - 3.0).abs() < 1e-10);
        assert_eq!(sp.path, vec!["S", "Y", "X", "T"]);
    }

    #[test]
    fn test_route_through_waypoints() {
        let g = diamond();
        let sp = route_through(&g, &["A", "C", "D"]);
        assert!((sp.distance - 2.0).abs() < 1e-10);
        assert_eq!(sp.path, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_route_through_unreachable_leg() {
        let g = diamond();
        let sp = route_through(&g, &["A", "D", "B"]);
        assert!(!sp.is_reachable());
        assert_eq!(sp.path, vec!["B"]);
    }

    #[test]
    fn test_route_through_single() {
        let sp = route_through(&diamond(), &["A"]);
        assert_eq!(sp.distance, 0.0);
        assert_eq!(sp.path, vec!["A"]);
    }
}
