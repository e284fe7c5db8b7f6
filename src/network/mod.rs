//! Transportation network model and routing.
//!
//! - [`Graph`] — directed weighted adjacency list with fork-then-disrupt mutation
//! - [`shortest_path`] — Dijkstra router
//! - [`demo_graph`] — reference city network with a central [`HUB`]

mod catalog;
mod dijkstra;
mod graph;

pub use catalog::{catalog, demo_graph, find_location, hub, HUB};
pub use dijkstra::{route_through, shortest_path, ShortestPath};
pub use graph::{Edge, Graph};
