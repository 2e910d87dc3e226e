use std::fmt;

use serde::Serialize;

use super::{Amount, LatLng};

/// The payload handed to the recommendation engine once the form validates.
///
/// Built exactly once per confirmed submission. There are no setters: the
/// value is moved into the consumer and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    location: LatLng,
    rooftop_area: f64,
    open_space_area: f64,
    budget: Amount,
}

impl CalculationRequest {
    /// Areas are in square metres.
    pub fn new(
        location: LatLng,
        rooftop_area: f64,
        open_space_area: f64,
        budget: Amount,
    ) -> Self {
        Self {
            location,
            rooftop_area,
            open_space_area,
            budget,
        }
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn rooftop_area(&self) -> f64 {
        self.rooftop_area
    }

    pub fn open_space_area(&self) -> f64 {
        self.open_space_area
    }

    pub fn budget(&self) -> Amount {
        self.budget
    }
}

impl fmt::Display for CalculationRequest {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Location:        {}", self.location)?;
        writeln!(f, "Rooftop area:    {:.2} m²", self.rooftop_area)?;
        writeln!(f, "Open space area: {:.2} m²", self.open_space_area)?;
        write!(f, "Budget:          {}", self.budget)
    }
}
