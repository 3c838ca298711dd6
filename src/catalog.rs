//! The fixed city catalog.
//!
//! The dashboard only serves cities from this compiled-in list; an unknown
//! name is reported before any network call is made. The catalog is immutable
//! and shared by reference everywhere it is consumed.

use serde::Serialize;

use crate::error::DashboardError;

/// A catalog entry: unique name plus geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const CITIES: &[City] = &[
    City { name: "Atlanta", latitude: 33.7490, longitude: -84.3880 },
    City { name: "Boston", latitude: 42.3601, longitude: -71.0589 },
    City { name: "Chicago", latitude: 41.8781, longitude: -87.6298 },
    City { name: "Dallas", latitude: 32.7767, longitude: -96.7970 },
    City { name: "Denver", latitude: 39.7392, longitude: -104.9903 },
    City { name: "Detroit", latitude: 42.3314, longitude: -83.0458 },
    City { name: "Honolulu", latitude: 21.3069, longitude: -157.8583 },
    City { name: "Houston", latitude: 29.7604, longitude: -95.3698 },
    City { name: "Las Vegas", latitude: 36.1699, longitude: -115.1398 },
    City { name: "Los Angeles", latitude: 34.0522, longitude: -118.2437 },
    City { name: "Miami", latitude: 25.7617, longitude: -80.1918 },
    City { name: "Minneapolis", latitude: 44.9778, longitude: -93.2650 },
    City { name: "Nashville", latitude: 36.1627, longitude: -86.7816 },
    City { name: "New Orleans", latitude: 29.9511, longitude: -90.0715 },
    City { name: "New York", latitude: 40.7128, longitude: -74.0060 },
    City { name: "Philadelphia", latitude: 39.9526, longitude: -75.1652 },
    City { name: "Phoenix", latitude: 33.4484, longitude: -112.0740 },
    City { name: "Portland", latitude: 45.5152, longitude: -122.6784 },
    City { name: "Saint Louis", latitude: 38.6270, longitude: -90.1994 },
    City { name: "Salt Lake City", latitude: 40.7608, longitude: -111.8910 },
    City { name: "San Diego", latitude: 32.7157, longitude: -117.1611 },
    City { name: "San Francisco", latitude: 37.7749, longitude: -122.4194 },
    City { name: "Seattle", latitude: 47.6062, longitude: -122.3321 },
    City { name: "Washington", latitude: 38.9072, longitude: -77.0369 },
];

/// Every catalog city, in selector order
#[must_use]
pub fn cities() -> &'static [City] {
    CITIES
}

/// Resolve a city name to its catalog entry.
///
/// Fails with [`DashboardError::UnknownCity`] without touching the network.
pub fn lookup(name: &str) -> Result<&'static City, DashboardError> {
    CITIES
        .iter()
        .find(|city| city.name == name)
        .ok_or_else(|| DashboardError::unknown_city(name))
}
