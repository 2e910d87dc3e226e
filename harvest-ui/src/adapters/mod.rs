//! Stand-ins for the external collaborators when running without a map,
//! a device location service, or a live recommendation engine.

pub mod headless;
pub mod json_consumer;
pub mod spherical;

pub use headless::{CoordinateGeocoder, HeadlessDrawingSdk, UnsupportedGeolocator};
pub use json_consumer::JsonLinesConsumer;
pub use spherical::SphericalGeometry;
