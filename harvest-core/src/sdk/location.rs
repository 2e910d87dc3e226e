use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::LatLng;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("geolocation is not available on this platform")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out after {0:?}")]
    Timeout(Duration),

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("no address found for {0}")]
    NoAddress(LatLng),
}

/// Platform geolocation service.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Current device position. `timeout` is forwarded to the platform API.
    async fn current_position(
        &self,
        timeout: Duration,
    ) -> Result<LatLng, LocationError>;
}

/// Reverse geocoding provided by the mapping SDK.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// A human-readable address for `position`.
    async fn reverse_geocode(
        &self,
        position: LatLng,
    ) -> Result<String, LocationError>;
}
