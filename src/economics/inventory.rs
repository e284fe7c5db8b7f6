//! Inventory-policy formulas.

use super::{require_non_negative, require_positive, ModelError};

/// Standard-normal quantiles for service levels 0.90 through 0.99.
const Z_TABLE: [(f64, f64); 10] = [
    (0.90, 1.28),
    (0.91, 1.34),
    (0.92, 1.41),
    (0.93, 1.48),
    (0.94, 1.55),
    (0.95, 1.65),
    (0.96, 1.75),
    (0.97, 1.88),
    (0.98, 2.05),
    (0.99, 2.33),
];

/// Quantile used when a service level is not in the table.
const DEFAULT_Z: f64 = 1.65;

/// Economic order quantity: `sqrt(2 · demand · setup_cost / holding_cost)`.
///
/// # Errors
///
/// [`ModelError::NonPositive`] if `holding_cost <= 0`, and
/// [`ModelError::Negative`] if `demand` or `setup_cost` is negative.
///
/// # Examples
///
/// ```
/// use sc_twin::economics::eoq;
///
/// let q = eoq(1000.0, 50.0, 2.0).unwrap();
/// assert!((q - 223.60679774997897).abs() < 1e-9);
/// assert!(eoq(1000.0, 50.0, 0.0).is_err());
/// ```
pub fn eoq(demand: f64, setup_cost: f64, holding_cost: f64) -> Result<f64, ModelError> {
    let demand = require_non_negative("demand", demand)?;
    let setup_cost = require_non_negative("setup_cost", setup_cost)?;
    let holding_cost = require_positive("holding_cost", holding_cost)?;
    Ok((2.0 * demand * setup_cost / holding_cost).sqrt())
}

/// Maps a service level to its standard-normal quantile.
///
/// Only the levels 0.90, 0.91, …, 0.99 are tabulated; anything else falls
/// back to the 0.95 quantile.
pub fn z_score(service_level: f64) -> f64 {
    Z_TABLE
        .iter()
        .find(|(level, _)| (level - service_level).abs() < 1e-9)
        .map(|&(_, z)| z)
        .unwrap_or(DEFAULT_Z)
}

/// Safety stock: `z(service_level) · sqrt(lead_time) · demand_variability`.
///
/// `_demand` is unused by the normal-approximation form; `demand_variability`
/// is the standard deviation of demand per period. Negative lead times are
/// treated as zero.
pub fn safety_stock(
    _demand: f64,
    lead_time: f64,
    service_level: f64,
    demand_variability: f64,
) -> f64 {
    z_score(service_level) * lead_time.max(0.0).sqrt() * demand_variability
}

/// Bullwhip amplification of demand variability up the chain.
///
/// `sqrt(1 + 2·L/p + 2·(L/p)²) · demand_variability` with `L` the lead time
/// and `p` the forecast period.
///
/// # Errors
///
/// [`ModelError::NonPositive`] if `forecast_period <= 0`.
pub fn bullwhip_effect(
    demand_variability: f64,
    lead_time: f64,
    forecast_period: f64,
) -> Result<f64, ModelError> {
    let forecast_period = require_positive("forecast_period", forecast_period)?;
    let ratio = lead_time / forecast_period;
    Ok((1.0 + 2.0 * ratio + 2.0 * ratio * ratio).sqrt() * demand_variability)
}

/// Lost-margin cost of a stockout.
pub fn stockout_cost(
    unit_cost: f64,
    stockout_probability: f64,
    demand_during_stockout: f64,
    profit_margin: f64,
) -> f64 {
    unit_cost * stockout_probability * demand_during_stockout * profit_margin
}

/// Newsvendor critical ratio `stockout / (stockout + holding)`, clamped to
/// `[0.5, 0.99]`.
///
/// Returns the lower bound when both costs are zero.
pub fn optimal_service_level(
    _demand: f64,
    _lead_time: f64,
    holding_cost: f64,
    stockout_cost: f64,
) -> f64 {
    let total = stockout_cost + holding_cost;
    if total <= 0.0 || !total.is_finite() {
        return 0.5;
    }
    (stockout_cost / total).clamp(0.5, 0.99)
}
