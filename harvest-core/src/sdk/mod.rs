//! Seams to the collaborators this crate only configures and consumes:
//! the mapping SDK (drawing tools, geometry), the platform location
//! services, and the downstream recommendation engine.

pub mod consumer;
pub mod drawing;
pub mod geometry;
pub mod location;

pub use consumer::CalculationConsumer;
pub use drawing::{DrawingSdk, DrawingTool, ToolLease};
pub use geometry::GeometryEngine;
pub use location::{Geocoder, Geolocator, LocationError};
