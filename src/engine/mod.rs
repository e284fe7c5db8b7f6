//! Simulation orchestration.
//!
//! - [`SimulationEngine`] — validates a request, dispatches to its scenario
//!   handler, and logs the run before returning the report
//! - [`SupplyChainData`] — port for routes, inventory, and suppliers
//! - [`RunLogger`] — append-only sink for finished runs

mod orchestrator;
mod ports;
mod run_log;

pub use orchestrator::SimulationEngine;
pub use ports::{InMemoryData, SupplyChainData};
pub use run_log::{JsonLinesRunLog, MemoryRunLog, RunLogger, RunRecord};
