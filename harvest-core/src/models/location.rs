use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinates used when the platform cannot report a position.
pub const DEFAULT_LOCATION: LatLng = LatLng {
    latitude: 28.6139,
    longitude: 77.2090,
};

pub const DEFAULT_LOCATION_LABEL: &str = "New Delhi, India";

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for LatLng {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A selected or detected location together with its human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: String,
    pub position: LatLng,
}

impl Place {
    pub fn new(
        label: impl Into<String>,
        position: LatLng,
    ) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }

    /// A place labelled only by its own coordinates.
    pub fn unlabelled(position: LatLng) -> Self {
        Self {
            label: position.to_string(),
            position,
        }
    }

    pub fn default_city() -> Self {
        Self::new(DEFAULT_LOCATION_LABEL, DEFAULT_LOCATION)
    }
}

impl fmt::Display for Place {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.position)
    }
}
