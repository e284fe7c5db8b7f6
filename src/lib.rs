//! # sc-twin
//!
//! Digital-twin engine for supply-chain disruption simulation. A scenario
//! (weather event, demand spike, supplier outage, peak season) is applied to
//! a road network and the stocked inventory; the engine reroutes around the
//! disruption and prices the result in cost, service level, carbon, and
//! inventory terms.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Route, InventoryItem, Supplier, params, report)
//! - [`network`] — Directed road graph, Dijkstra router, demo city catalog
//! - [`economics`] — Operations-research formulas (EOQ, safety stock, freight, risk)
//! - [`scenarios`] — One handler per disruption type
//! - [`engine`] — Orchestrator, data-access port, run log
//! - [`config`] — Tuning constants
//! - [`error`] — Error taxonomy

pub mod config;
pub mod economics;
pub mod engine;
pub mod error;
pub mod models;
pub mod network;
pub mod scenarios;
