//! Engine tuning constants.

use serde::{Deserialize, Serialize};

use crate::economics::TransportMode;
use crate::error::Result;

/// Constants the scenario handlers plug into the formula library.
///
/// Every field has a default; a JSON config only needs the fields it
/// overrides.
///
/// # Examples
///
/// ```
/// use sc_twin::config::EngineConfig;
///
/// let cfg = EngineConfig::from_json_str(r#"{"profit_margin": 0.25}"#).unwrap();
/// assert_eq!(cfg.profit_margin, 0.25);
/// assert_eq!(cfg.lead_time_days, 7.0);
///
/// let cfg = EngineConfig::default().with_seed(7).with_service_level(0.99);
/// assert_eq!(cfg.seed, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Vehicle class when a request names none.
    pub default_mode: TransportMode,
    /// Margin lost per unit of unmet demand, as a fraction of unit cost.
    pub profit_margin: f64,
    /// Target service level for safety stock.
    pub service_level: f64,
    /// Replenishment lead time, days.
    pub lead_time_days: f64,
    /// Forecast review period, days.
    pub forecast_period_days: f64,
    /// Coefficient of variation of daily demand.
    pub demand_variability: f64,
    /// Share of spike demand shipped expedited.
    pub expedited_fraction: f64,
    /// Expedited haul length, km.
    pub expedited_distance_km: f64,
    /// Backup-supplier haul length, km.
    pub long_haul_distance_km: f64,
    /// Peak-season stock buildup haul length, km.
    pub buildup_distance_km: f64,
    /// Handling capacity as a multiple of normal daily consumption.
    pub capacity_headroom: f64,
    /// Warehouse efficiency for capacity utilisation.
    pub warehouse_efficiency: f64,
    /// Price elasticity of demand.
    pub price_elasticity: f64,
    /// Seed for randomised edge removal.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_mode: TransportMode::Truck,
            profit_margin: 0.30,
            service_level: 0.95,
            lead_time_days: 7.0,
            forecast_period_days: 7.0,
            demand_variability: 0.20,
            expedited_fraction: 0.15,
            expedited_distance_km: 500.0,
            long_haul_distance_km: 800.0,
            buildup_distance_km: 300.0,
            capacity_headroom: 1.5,
            warehouse_efficiency: 0.90,
            price_elasticity: 1.5,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config, filling omitted fields with defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Sets the default vehicle class.
    pub fn with_default_mode(mut self, mode: TransportMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Sets the profit margin.
    pub fn with_profit_margin(mut self, margin: f64) -> Self {
        self.profit_margin = margin;
        self
    }

    /// Sets the target service level.
    pub fn with_service_level(mut self, level: f64) -> Self {
        self.service_level = level;
        self
    }

    /// Sets the replenishment lead time.
    pub fn with_lead_time_days(mut self, days: f64) -> Self {
        self.lead_time_days = days;
        self
    }

    /// Sets the edge-removal seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
