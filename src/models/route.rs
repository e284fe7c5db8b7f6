//! Delivery route records supplied by the routing subsystem.

use serde::{Deserialize, Serialize};

use super::Location;

/// Lifecycle state of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// Scheduled, not yet dispatched.
    #[default]
    Planned,
    /// Vehicle on the road.
    Active,
    /// Running behind schedule.
    Delayed,
    /// Delivered.
    Completed,
    /// Called off.
    Cancelled,
}

impl RouteStatus {
    /// Returns `true` if the route can still be disrupted.
    pub fn is_in_service(&self) -> bool {
        matches!(self, Self::Planned | Self::Active | Self::Delayed)
    }
}

/// A delivery route from `origin` to `destination` through optional stops.
///
/// Read-only input to the engine; disruptions recompute paths but never
/// write back to the route.
///
/// # Examples
///
/// ```
/// use sc_twin::models::{Location, Route};
///
/// let route = Route::new(7, "New Delhi", "Mumbai")
///     .with_stop(Location::new("Jaipur", 26.91, 75.79))
///     .with_volume(120.0);
/// assert!(route.touches("Jaipur"));
/// assert_eq!(route.waypoints(), vec!["New Delhi", "Jaipur", "Mumbai"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Route id.
    pub id: u64,
    /// Start location name.
    pub origin: String,
    /// End location name.
    pub destination: String,
    /// Intermediate stops in visiting order.
    #[serde(default)]
    pub stops: Vec<Location>,
    /// Planned distance in km.
    #[serde(default)]
    pub distance: f64,
    /// Planned duration in minutes.
    #[serde(default)]
    pub estimated_duration_minutes: f64,
    /// Planned fuel cost.
    #[serde(default)]
    pub fuel_cost: f64,
    /// Planned emissions in kg CO₂.
    #[serde(default)]
    pub co2_emission: f64,
    /// Load carried, in units.
    #[serde(default)]
    pub volume: f64,
    /// Lifecycle state.
    #[serde(default)]
    pub status: RouteStatus,
}

impl Route {
    /// Creates a planned route with no stops and zero metrics.
    pub fn new(id: u64, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id,
            origin: origin.into(),
            destination: destination.into(),
            stops: Vec::new(),
            distance: 0.0,
            estimated_duration_minutes: 0.0,
            fuel_cost: 0.0,
            co2_emission: 0.0,
            volume: 0.0,
            status: RouteStatus::Planned,
        }
    }

    /// Appends an intermediate stop.
    pub fn with_stop(mut self, stop: Location) -> Self {
        self.stops.push(stop);
        self
    }

    /// Sets the carried volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the lifecycle state.
    pub fn with_status(mut self, status: RouteStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns `true` if the route starts, ends, or stops at `city`.
    pub fn touches(&self, city: &str) -> bool {
        self.origin == city || self.destination == city || self.stops.iter().any(|s| s.name == city)
    }

    /// Origin, stops, and destination in travel order.
    pub fn waypoints(&self) -> Vec<&str> {
        std::iter::once(self.origin.as_str())
            .chain(self.stops.iter().map(|s| s.name.as_str()))
            .chain(std::iter::once(self.destination.as_str()))
            .collect()
    }
}
