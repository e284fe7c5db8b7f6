//! Domain model types for disruption simulation.
//!
//! Reference data owned outside the engine (locations, routes, inventory,
//! suppliers), the scenario request union, and the report the engine hands
//! back to its caller.

mod inventory;
mod location;
mod params;
mod report;
mod route;
mod supplier;

pub use inventory::InventoryItem;
pub use location::Location;
pub use params::{
    DemandSpikeParams, PeakSeasonParams, Scenario, Severity, SimulationParams,
    SupplierOutageParams, WeatherEventParams, WeatherKind,
};
pub use report::{
    CarbonImpact, CostImpact, Details, Impact, InventoryImpact, Priority, ProductImpact,
    Recommendation, ReroutedPath, RouteImpact, SimulationReport, SlaImpact, Summary,
};
pub use route::{Route, RouteStatus};
pub use supplier::Supplier;
