use crate::models::LatLng;

/// Area computation provided by the mapping SDK.
pub trait GeometryEngine {
    /// Area enclosed by `path`, in square metres.
    ///
    /// Paths with fewer than three vertices enclose nothing and must yield 0.
    fn polygon_area(
        &self,
        path: &[LatLng],
    ) -> f64;
}
