use std::f64::consts::FRAC_PI_2;

use harvest_core::{GeometryEngine, LatLng};

/// Equatorial radius used by web map SDKs for area computation, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Polygon area on a sphere, summing the signed areas of the polar triangles
/// spanned by each edge. Matches what common web map SDKs report.
#[derive(Debug, Clone, Copy)]
pub struct SphericalGeometry {
    radius: f64,
}

impl SphericalGeometry {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Signed area in m²; counter-clockwise paths are positive.
    pub fn signed_area(
        &self,
        path: &[LatLng],
    ) -> f64 {
        if path.len() < 3 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut prev = path[path.len() - 1];
        for &point in path {
            total += polar_triangle_area(
                colatitude_tan(prev.latitude),
                prev.longitude.to_radians(),
                colatitude_tan(point.latitude),
                point.longitude.to_radians(),
            );
            prev = point;
        }
        total * self.radius * self.radius
    }
}

impl Default for SphericalGeometry {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_METERS)
    }
}

impl GeometryEngine for SphericalGeometry {
    fn polygon_area(
        &self,
        path: &[LatLng],
    ) -> f64 {
        self.signed_area(path).abs()
    }
}

fn colatitude_tan(latitude: f64) -> f64 {
    ((FRAC_PI_2 - latitude.to_radians()) / 2.0).tan()
}

/// Signed area of the triangle formed by the pole and one edge, on the
/// unit sphere.
fn polar_triangle_area(
    tan1: f64,
    lng1: f64,
    tan2: f64,
    lng2: f64,
) -> f64 {
    let delta = lng1 - lng2;
    let t = tan1 * tan2;
    2.0 * (t * delta.sin()).atan2(1.0 + t * delta.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(
        origin: LatLng,
        side_deg: f64,
    ) -> Vec<LatLng> {
        vec![
            origin,
            LatLng::new(origin.latitude, origin.longitude + side_deg),
            LatLng::new(origin.latitude + side_deg, origin.longitude + side_deg),
            LatLng::new(origin.latitude + side_deg, origin.longitude),
        ]
    }

    #[test]
    fn degenerate_paths_have_no_area() {
        let geometry = SphericalGeometry::default();

        assert_eq!(geometry.polygon_area(&[]), 0.0);
        assert_eq!(
            geometry.polygon_area(&[LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)]),
            0.0
        );
    }

    #[test]
    fn small_equatorial_square_matches_planar_estimate() {
        let geometry = SphericalGeometry::default();
        let side_m = EARTH_RADIUS_METERS * 0.001_f64.to_radians();

        let area = geometry.polygon_area(&square(LatLng::new(0.0, 0.0), 0.001));

        let expected = side_m * side_m;
        assert!((area - expected).abs() / expected < 0.001, "area {area}");
    }

    #[test]
    fn winding_order_does_not_change_area() {
        let geometry = SphericalGeometry::default();
        let path = square(LatLng::new(28.6, 77.2), 0.0005);
        let mut reversed = path.clone();
        reversed.reverse();

        let forward = geometry.polygon_area(&path);
        let backward = geometry.polygon_area(&reversed);

        assert!((forward - backward).abs() < 1e-6);
        assert!(geometry.signed_area(&path) * geometry.signed_area(&reversed) < 0.0);
    }
}
