//! Transport modes and per-shipment cost, carbon, and lead-time formulas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Delivery vehicle class.
///
/// Each mode carries a fixed base freight rate, CO₂ rate, and average speed.
///
/// # Examples
///
/// ```
/// use sc_twin::economics::TransportMode;
///
/// let mode: TransportMode = "mini-truck".parse().unwrap();
/// assert_eq!(mode, TransportMode::MiniTruck);
/// assert_eq!(mode.base_rate(), 0.80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Heavy road freight.
    #[default]
    Truck,
    /// Light commercial vehicle.
    #[serde(alias = "mini-truck")]
    MiniTruck,
    /// Driverless road vehicle.
    #[serde(alias = "autonomous_vehicle", alias = "autonomous-vehicle")]
    Autonomous,
    /// Aerial drone.
    Drone,
}

impl TransportMode {
    /// All modes, in declaration order.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Truck,
        TransportMode::MiniTruck,
        TransportMode::Autonomous,
        TransportMode::Drone,
    ];

    /// Freight cost per km before volume discount.
    pub fn base_rate(&self) -> f64 {
        match self {
            Self::Truck => 1.20,
            Self::MiniTruck => 0.80,
            Self::Autonomous => 0.60,
            Self::Drone => 2.50,
        }
    }

    /// kg CO₂ per km before efficiency gain.
    pub fn co2_per_km(&self) -> f64 {
        match self {
            Self::Truck => 0.80,
            Self::MiniTruck => 0.50,
            Self::Autonomous => 0.30,
            Self::Drone => 0.10,
        }
    }

    /// Average speed in km/h.
    pub fn speed_kmh(&self) -> f64 {
        match self {
            Self::Truck => 60.0,
            Self::MiniTruck => 50.0,
            Self::Autonomous => 45.0,
            Self::Drone => 80.0,
        }
    }

    /// Snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truck => "truck",
            Self::MiniTruck => "mini_truck",
            Self::Autonomous => "autonomous",
            Self::Drone => "drone",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "truck" => Ok(Self::Truck),
            "mini_truck" => Ok(Self::MiniTruck),
            "autonomous" | "autonomous_vehicle" => Ok(Self::Autonomous),
            "drone" => Ok(Self::Drone),
            other => Err(format!("unknown transport mode '{other}'")),
        }
    }
}

/// Freight cost for moving `volume` units over `distance` km.
///
/// The base rate is reduced by a volume discount of `volume / 1000`, capped
/// at 30%.
///
/// # Examples
///
/// ```
/// use sc_twin::economics::{transport_cost, TransportMode};
///
/// // 100 km by truck, 200 units → 20% discount: 100 * 1.2 * 0.8
/// let c = transport_cost(100.0, 200.0, TransportMode::Truck);
/// assert!((c - 96.0).abs() < 1e-9);
/// ```
pub fn transport_cost(distance: f64, volume: f64, mode: TransportMode) -> f64 {
    let discount = (volume / 1000.0).clamp(0.0, 0.3);
    mode.base_rate() * (1.0 - discount) * distance
}

/// kg CO₂ for moving `volume` units over `distance` km.
///
/// Consolidation yields an efficiency gain of `volume / 500`, capped at 20%.
pub fn carbon_footprint(distance: f64, volume: f64, mode: TransportMode) -> f64 {
    let gain = (volume / 500.0).clamp(0.0, 0.2);
    mode.co2_per_km() * (1.0 - gain) * distance
}

/// Effective lead time under variability and criticality.
///
/// `base · (1 + 0.5·variability) · (1 + 0.3·criticality)`.
pub fn lead_time_impact(base_lead_time: f64, variability: f64, criticality: f64) -> f64 {
    base_lead_time * (1.0 + 0.5 * variability) * (1.0 + 0.3 * criticality)
}
