//! The simulation engine.

use tracing::{info, warn};

use super::{RunLogger, RunRecord, SupplyChainData};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{SimulationParams, SimulationReport};
use crate::network::Graph;
use crate::scenarios::{demand_spike, peak_season, supplier_outage, weather, ScenarioContext};

/// Runs disruption scenarios against a canonical network.
///
/// The engine owns its graph read-only; handlers fork it before mutating,
/// so one engine can serve concurrent runs.
///
/// # Examples
///
/// ```
/// use sc_twin::engine::{InMemoryData, MemoryRunLog, SimulationEngine};
/// use sc_twin::network::demo_graph;
///
/// let engine = SimulationEngine::new(demo_graph(), InMemoryData::new(), MemoryRunLog::new());
/// let report = engine
///     .run_json(serde_json::json!({
///         "scenario": "weather_event",
///         "eventType": "flood",
///         "city": "Mumbai",
///         "severity": "high"
///     }))
///     .unwrap();
/// assert_eq!(report.impact.sla.affected_routes, 0);
/// assert!(!report.recommendations.is_empty());
/// assert_eq!(engine.logger().len(), 1);
/// ```
#[derive(Debug)]
pub struct SimulationEngine<D, L> {
    graph: Graph,
    data: D,
    logger: L,
    config: EngineConfig,
}

impl<D: SupplyChainData, L: RunLogger> SimulationEngine<D, L> {
    /// Creates an engine with the default configuration.
    pub fn new(graph: Graph, data: D, logger: L) -> Self {
        Self {
            graph,
            data,
            logger,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Canonical network.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Data source.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Run log sink.
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one scenario to completion.
    ///
    /// The run is logged before the report is returned; if the log write
    /// fails, the run fails.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`](crate::error::EngineError) from validation, the
    /// handler, the final finiteness check, or the run log.
    pub fn run(&self, params: &SimulationParams) -> Result<SimulationReport> {
        let scenario = params.scenario();
        info!(%scenario, "simulation started");
        params.validate()?;

        let ctx = ScenarioContext {
            graph: &self.graph,
            data: &self.data,
            config: &self.config,
        };
        let report = match params {
            SimulationParams::WeatherEvent(p) => weather::simulate(&ctx, p),
            SimulationParams::DemandSpike(p) => demand_spike::simulate(&ctx, p),
            SimulationParams::SupplierOutage(p) => supplier_outage::simulate(&ctx, p),
            SimulationParams::PeakSeason(p) => peak_season::simulate(&ctx, p),
        }
        .map_err(|e| {
            warn!(%scenario, error = %e, "simulation failed");
            e
        })?;
        report.check_finite()?;

        self.logger.append(RunRecord::new(params, &report.impact)?)?;
        info!(
            %scenario,
            additional_cost = report.impact.cost.additional_cost,
            recommendations = report.recommendations.len(),
            "simulation finished"
        );
        Ok(report)
    }

    /// Parses a raw JSON request and runs it.
    ///
    /// # Errors
    ///
    /// As [`SimulationParams::from_json`] and [`run`](Self::run).
    pub fn run_json(&self, value: serde_json::Value) -> Result<SimulationReport> {
        let params = SimulationParams::from_json(value)?;
        self.run(&params)
    }
}
