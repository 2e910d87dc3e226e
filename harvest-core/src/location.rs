//! Initial location detection.
//!
//! Asks the platform for the device position and falls back to a fixed
//! default city whenever that fails. The detected position is then labelled
//! through reverse geocoding; a failed lookup just keeps the coordinates as
//! the label. Nothing here retries or cancels.

use std::time::Duration;

use tracing::{debug, warn};

use crate::models::Place;
use crate::sdk::{Geocoder, Geolocator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// Reported by the platform geolocation service.
    Detected,
    /// The configured default, used because detection failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub place: Place,
    pub source: LocationSource,
}

pub struct LocationResolver {
    geolocator: Box<dyn Geolocator>,
    geocoder: Box<dyn Geocoder>,
    fallback: Place,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(
        geolocator: Box<dyn Geolocator>,
        geocoder: Box<dyn Geocoder>,
        fallback: Place,
        timeout: Duration,
    ) -> Self {
        Self {
            geolocator,
            geocoder,
            fallback,
            timeout,
        }
    }

    pub fn fallback(&self) -> &Place {
        &self.fallback
    }

    /// Resolves the user's starting location. Never fails.
    pub async fn detect(&self) -> ResolvedLocation {
        let position = match self.geolocator.current_position(self.timeout).await {
            Ok(position) => position,
            Err(error) => {
                warn!(%error, fallback = %self.fallback, "geolocation failed, using default location");
                return ResolvedLocation {
                    place: self.fallback.clone(),
                    source: LocationSource::Fallback,
                };
            }
        };

        let place = match self.geocoder.reverse_geocode(position).await {
            Ok(label) => Place::new(label, position),
            Err(error) => {
                debug!(%error, %position, "reverse geocoding failed");
                Place::unlabelled(position)
            }
        };

        ResolvedLocation {
            place,
            source: LocationSource::Detected,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::LatLng;
    use crate::sdk::LocationError;

    struct FixedGeolocator(Result<LatLng, LocationError>);

    #[async_trait]
    impl Geolocator for FixedGeolocator {
        async fn current_position(
            &self,
            _timeout: Duration,
        ) -> Result<LatLng, LocationError> {
            self.0.clone()
        }
    }

    struct FixedGeocoder(Result<String, LocationError>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn reverse_geocode(
            &self,
            _position: LatLng,
        ) -> Result<String, LocationError> {
            self.0.clone()
        }
    }

    fn resolver(
        position: Result<LatLng, LocationError>,
        label: Result<String, LocationError>,
    ) -> LocationResolver {
        LocationResolver::new(
            Box::new(FixedGeolocator(position)),
            Box::new(FixedGeocoder(label)),
            Place::default_city(),
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn detected_position_is_reverse_geocoded() {
        let pune = LatLng::new(18.5204, 73.8567);
        let resolver = resolver(Ok(pune), Ok("Pune, Maharashtra".to_string()));

        let resolved = resolver.detect().await;

        assert_eq!(resolved.source, LocationSource::Detected);
        assert_eq!(resolved.place, Place::new("Pune, Maharashtra", pune));
    }

    #[tokio::test]
    async fn denied_permission_falls_back_to_default_city() {
        let resolver = resolver(
            Err(LocationError::PermissionDenied),
            Ok("unused".to_string()),
        );

        let resolved = resolver.detect().await;

        assert_eq!(resolved.source, LocationSource::Fallback);
        assert_eq!(resolved.place, Place::default_city());
    }

    #[tokio::test]
    async fn missing_capability_falls_back_to_default_city() {
        let resolver = resolver(Err(LocationError::Unsupported), Ok("unused".to_string()));

        assert_eq!(resolver.detect().await.place, Place::default_city());
    }

    #[tokio::test]
    async fn failed_geocoding_keeps_coordinates_as_label() {
        let position = LatLng::new(12.9716, 77.5946);
        let resolver = resolver(
            Ok(position),
            Err(LocationError::NoAddress(position)),
        );

        let resolved = resolver.detect().await;

        assert_eq!(resolved.source, LocationSource::Detected);
        assert_eq!(resolved.place.label, "12.9716, 77.5946");
    }
}
