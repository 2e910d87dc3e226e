//! Derived areas and their display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::AreaUnit;

/// Open space left on a property once the rooftop is taken out.
///
/// Polygons traced by hand rarely nest perfectly, so a rooftop that comes out
/// slightly larger than its property yields zero rather than a negative area.
///
/// # Examples
///
/// ```
/// use harvest_core::calculations::open_space_area;
///
/// assert_eq!(open_space_area(300.0, 120.0), 180.0);
/// assert_eq!(open_space_area(99.9, 100.0), 0.0);
/// ```
pub fn open_space_area(
    property: f64,
    rooftop: f64,
) -> f64 {
    (property - rooftop).max(0.0)
}

/// Areas derived from whatever polygons have been drawn, in m².
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasuredAreas {
    pub rooftop: f64,
    pub property: f64,
    pub open_space: f64,
}

impl MeasuredAreas {
    /// Combines the measured polygon areas.
    ///
    /// With only one polygon present, its area is reported as the matching
    /// figure (rooftop, or open space for a lone property outline) and the
    /// other figure is zero.
    pub fn from_polygons(
        rooftop: Option<f64>,
        property: Option<f64>,
    ) -> Self {
        match (rooftop, property) {
            (Some(rooftop), Some(property)) => Self {
                rooftop,
                property,
                open_space: open_space_area(property, rooftop),
            },
            (Some(rooftop), None) => Self {
                rooftop,
                property: 0.0,
                open_space: 0.0,
            },
            (None, Some(property)) => Self {
                rooftop: 0.0,
                property,
                open_space: property,
            },
            (None, None) => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rooftop <= 0.0 && self.open_space <= 0.0
    }
}

impl fmt::Display for MeasuredAreas {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "rooftop {}, open space {}",
            format_area(self.rooftop, AreaUnit::SquareMeters),
            format_area(self.open_space, AreaUnit::SquareMeters)
        )
    }
}

/// Formats an area held in m² for display in `unit`, to two decimals.
///
/// # Examples
///
/// ```
/// use harvest_core::{AreaUnit, calculations::format_area};
///
/// assert_eq!(format_area(120.0, AreaUnit::SquareMeters), "120.00 m²");
/// assert_eq!(format_area(92.90304, AreaUnit::SquareFeet), "1000.00 ft²");
/// ```
pub fn format_area(
    square_meters: f64,
    unit: AreaUnit,
) -> String {
    format!("{:.2} {}", unit.from_square_meters(square_meters), unit.symbol())
}
