//! Operations-research formula library.
//!
//! Stateless functions over plain numbers, independently testable from the
//! scenario handlers that compose them.
//!
//! - [`inventory`] — EOQ, safety stock, bullwhip, stockout cost, optimal service level
//! - [`transport`] — transport modes, freight cost, carbon, lead-time impact
//! - [`risk`] — risk-adjusted cost, capacity utilisation, dynamic pricing
//!
//! Formulas that divide return `Result<f64, ModelError>` so degenerate input
//! never leaks NaN or infinity into a report.

pub mod inventory;
pub mod risk;
pub mod transport;

use thiserror::Error;

pub use inventory::{
    bullwhip_effect, eoq, optimal_service_level, safety_stock, stockout_cost, z_score,
};
pub use risk::{capacity_utilization, dynamic_price, risk_adjusted_cost, risk_impact};
pub use transport::{carbon_footprint, lead_time_impact, transport_cost, TransportMode};

/// Degenerate input to a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A divisor or scale parameter was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A quantity under a square root was negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A computed value is NaN or infinite.
    #[error("{name} is not a finite number")]
    NonFinite {
        /// Name of the computed field.
        name: &'static str,
    },
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonPositive { name, value })
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::Negative { name, value })
    }
}
