use std::time::Duration;

use async_trait::async_trait;
use harvest_core::{
    DrawingSdk, DrawingTool, Geocoder, Geolocator, LatLng, LocationError, PolygonKind,
    PolygonStyle,
};
use tracing::{debug, info};

/// Drawing SDK for runs without a map: polygons arrive from a file, so
/// activating a tool only records that it happened.
#[derive(Debug, Default)]
pub struct HeadlessDrawingSdk {
    activations: usize,
}

impl HeadlessDrawingSdk {
    pub fn activations(&self) -> usize {
        self.activations
    }
}

impl DrawingSdk for HeadlessDrawingSdk {
    fn activate(
        &mut self,
        kind: PolygonKind,
        style: &PolygonStyle,
    ) -> Box<dyn DrawingTool> {
        self.activations += 1;
        info!(%kind, stroke = style.stroke_color, "waiting for {kind} outline");
        Box::new(HeadlessTool { kind })
    }
}

struct HeadlessTool {
    kind: PolygonKind,
}

impl DrawingTool for HeadlessTool {
    fn release(&mut self) {
        debug!(kind = %self.kind, "headless drawing tool detached");
    }
}

/// Geolocator for platforms without a location service.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn current_position(
        &self,
        _timeout: Duration,
    ) -> Result<LatLng, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Offline geocoder that labels a position with its own coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoordinateGeocoder;

#[async_trait]
impl Geocoder for CoordinateGeocoder {
    async fn reverse_geocode(
        &self,
        position: LatLng,
    ) -> Result<String, LocationError> {
        Ok(position.to_string())
    }
}
