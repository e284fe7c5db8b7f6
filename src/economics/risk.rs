//! Risk, capacity, and pricing formulas.

use super::{require_positive, ModelError};

/// Cost impact weight of a named risk factor.
///
/// Unknown names weigh 0.10.
pub fn risk_impact(name: &str) -> f64 {
    match name {
        "supplier_failure" => 0.30,
        "transport_delay" => 0.20,
        "quality_issue" => 0.25,
        "demand_spike" => 0.15,
        "weather_event" => 0.40,
        "capacity_constraint" => 0.35,
        _ => 0.10,
    }
}

/// Scales `base_cost` by `1 + Σ probability · impact(name)`.
///
/// # Examples
///
/// ```
/// use sc_twin::economics::risk_adjusted_cost;
///
/// assert_eq!(risk_adjusted_cost(100.0, &[]), 100.0);
/// let c = risk_adjusted_cost(100.0, &[("weather_event", 0.5)]);
/// assert!((c - 120.0).abs() < 1e-9);
/// ```
pub fn risk_adjusted_cost(base_cost: f64, risk_factors: &[(&str, f64)]) -> f64 {
    let multiplier = risk_factors
        .iter()
        .fold(1.0, |acc, &(name, probability)| {
            acc + probability * risk_impact(name)
        });
    base_cost * multiplier
}

/// Effective utilisation of a resource, capped at 1.0.
///
/// Above 80% raw utilisation, congestion erodes `efficiency` by
/// `0.5 · (utilisation − 0.8)²`.
///
/// # Errors
///
/// [`ModelError::NonPositive`] if `capacity <= 0`.
pub fn capacity_utilization(
    current_load: f64,
    capacity: f64,
    efficiency: f64,
) -> Result<f64, ModelError> {
    let capacity = require_positive("capacity", capacity)?;
    let utilization = current_load / capacity;
    let efficiency = if utilization > 0.8 {
        efficiency - 0.5 * (utilization - 0.8).powi(2)
    } else {
        efficiency
    };
    Ok((utilization * efficiency).min(1.0))
}

/// Price that clears `demand` against `supply`.
///
/// `base_price · (supply / demand)^(−1 / elasticity)`.
///
/// # Errors
///
/// [`ModelError::NonPositive`] if `demand`, `supply`, or `elasticity` is not
/// positive.
pub fn dynamic_price(
    base_price: f64,
    demand: f64,
    supply: f64,
    elasticity: f64,
) -> Result<f64, ModelError> {
    let demand = require_positive("demand", demand)?;
    let supply = require_positive("supply", supply)?;
    let elasticity = require_positive("elasticity", elasticity)?;
    Ok(base_price * (supply / demand).powf(-1.0 / elasticity))
}
