pub mod calculations;
pub mod drawing;
pub mod location;
pub mod models;
pub mod sdk;

pub use drawing::{DrawingError, DrawingEvent, DrawingSession};
pub use location::{LocationResolver, LocationSource, ResolvedLocation};
pub use models::*;
pub use sdk::{CalculationConsumer, DrawingSdk, DrawingTool, Geocoder, GeometryEngine, Geolocator, LocationError};
