//! Scenario handlers, one per disruption type.
//!
//! Each handler reads external data through the [`SupplyChainData`] port,
//! forks and disrupts the network where relevant, runs the formula library
//! over before/after totals, and assembles a complete
//! [`SimulationReport`](crate::models::SimulationReport).
//!
//! - [`weather`] — edge removal or slow-down around a city, rerouting
//! - [`demand_spike`] — category demand surge against stock
//! - [`supplier_outage`] — supply loss with backup sourcing
//! - [`peak_season`] — seasonal ramp with stock buildup

pub mod demand_spike;
pub mod peak_season;
pub mod supplier_outage;
pub mod weather;

use crate::config::EngineConfig;
use crate::engine::SupplyChainData;
use crate::network::Graph;

/// Everything a handler may read.
pub struct ScenarioContext<'a> {
    /// Canonical network; handlers fork before mutating.
    pub graph: &'a Graph,
    /// External data.
    pub data: &'a dyn SupplyChainData,
    /// Tuning constants.
    pub config: &'a EngineConfig,
}

/// `part / whole` in percent, or 0 when `whole` is not positive.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        100.0 * part / whole
    } else {
        0.0
    }
}

/// `1 − unmet / demand`, or 1 when there is no demand.
pub(crate) fn fill_rate(unmet: f64, demand: f64) -> f64 {
    if demand > 0.0 {
        (1.0 - unmet / demand).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Formats product ids as `#1, #2, #3`.
pub(crate) fn id_list(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(", ")
}
