//! Directed weighted location graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A directed edge to another location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Destination location name.
    pub to: String,
    /// Road distance in km. Infinite marks an impassable link.
    pub distance: f64,
}

/// Transportation network as an adjacency list keyed by location name.
///
/// Edges are directed; `a → b` may exist without `b → a`. Adjacency is held
/// in a `BTreeMap` so node iteration order is stable across runs.
///
/// Scenario handlers never mutate the canonical graph. They take a
/// [`Graph::fork`] and disrupt the fork.
///
/// # Examples
///
/// ```
/// use sc_twin::network::Graph;
///
/// let mut g = Graph::new();
/// g.add_road("A", "B", 10.0);
/// g.add_edge("B", "C", 5.0);
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 3);
///
/// let mut fork = g.fork();
/// fork.scale_edges_touching("B", 2.0);
/// assert_eq!(g.edges("A")[0].distance, 10.0);
/// assert_eq!(fork.edges("A")[0].distance, 20.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: BTreeMap<String, Vec<Edge>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location with no outgoing edges. No-op if already present.
    pub fn add_node(&mut self, name: &str) {
        if !self.adjacency.contains_key(name) {
            self.adjacency.insert(name.to_string(), Vec::new());
        }
    }

    /// Adds a one-way edge, registering both endpoints as nodes.
    pub fn add_edge(&mut self, from: &str, to: &str, distance: f64) {
        self.add_node(to);
        self.add_node(from);
        if let Some(edges) = self.adjacency.get_mut(from) {
            edges.push(Edge {
                to: to.to_string(),
                distance,
            });
        }
    }

    /// Adds edges in both directions with the same distance.
    pub fn add_road(&mut self, a: &str, b: &str, distance: f64) {
        self.add_edge(a, b, distance);
        self.add_edge(b, a, distance);
    }

    /// Returns `true` if the location is a node of this graph.
    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Returns the graph-owned key for `name`, if present.
    pub(crate) fn key(&self, name: &str) -> Option<&str> {
        self.adjacency.get_key_value(name).map(|(k, _)| k.as_str())
    }

    /// Outgoing edges of a location, in insertion order.
    ///
    /// Empty for unknown locations.
    pub fn edges(&self, name: &str) -> &[Edge] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Location names in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Number of locations.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns an independent deep copy.
    ///
    /// Every adjacency list and edge is duplicated; mutating the fork never
    /// affects `self`.
    pub fn fork(&self) -> Graph {
        Graph {
            adjacency: self
                .adjacency
                .iter()
                .map(|(name, edges)| (name.clone(), edges.to_vec()))
                .collect(),
        }
    }

    /// Multiplies the distance of every edge entering or leaving `city`.
    ///
    /// Returns the number of edges touched.
    pub fn scale_edges_touching(&mut self, city: &str, factor: f64) -> usize {
        let mut touched = 0;
        for (from, edges) in self.adjacency.iter_mut() {
            for edge in edges.iter_mut() {
                if from == city || edge.to == city {
                    edge.distance *= factor;
                    touched += 1;
                }
            }
        }
        touched
    }

    /// Removes edges entering or leaving `city` for which `remove` returns
    /// `true`. Edges not touching `city` are left alone.
    ///
    /// Edges are visited in node order, then insertion order. Returns the
    /// number of edges removed.
    pub fn remove_edges_touching<F>(&mut self, city: &str, mut remove: F) -> usize
    where
        F: FnMut(&str, &Edge) -> bool,
    {
        let mut removed = 0;
        for (from, edges) in self.adjacency.iter_mut() {
            let before = edges.len();
            edges.retain(|edge| !((from == city || edge.to == city) && remove(from, edge)));
            removed += before - edges.len();
        }
        removed
    }

    /// Marks the directed link `from → to` impassable.
    ///
    /// Returns `false` if no such edge exists.
    pub fn block_edge(&mut self, from: &str, to: &str) -> bool {
        let mut found = false;
        if let Some(edges) = self.adjacency.get_mut(from) {
            for edge in edges.iter_mut().filter(|e| e.to == to) {
                edge.distance = f64::INFINITY;
                found = true;
            }
        }
        found
    }
}
