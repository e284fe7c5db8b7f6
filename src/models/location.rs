//! Geographic location type.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named point on the map.
///
/// # Examples
///
/// ```
/// use sc_twin::models::Location;
///
/// let delhi = Location::new("New Delhi", 28.6139, 77.2090);
/// let jaipur = Location::new("Jaipur", 26.9124, 75.7873);
/// let d = delhi.distance_to(&jaipur);
/// assert!(d > 230.0 && d < 240.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location name; graph nodes are keyed by it.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Location {
    /// Creates a location.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Great-circle (haversine) distance in km.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlng = (other.lng - self.lng).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}
