use std::fmt;

use harvest_core::{
    Amount, AreaUnit, CalculationRequest, InputMode, Place,
    calculations::{MeasuredAreas, format_area},
};
use thiserror::Error;

use crate::utils::{opt_area_display, parse_optional_area};

/// A typed area together with the unit it was typed in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaField {
    pub text: String,
    pub unit: AreaUnit,
}

impl AreaField {
    pub fn new(
        text: impl Into<String>,
        unit: AreaUnit,
    ) -> Self {
        Self {
            text: text.into(),
            unit,
        }
    }

    /// The entered area converted to m², or `None` if blank or unparseable.
    pub fn square_meters(&self) -> Option<f64> {
        parse_optional_area(&self.text).map(|value| self.unit.to_square_meters(value))
    }
}

/// Reasons a submission is blocked. Each names the field to fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Enter a rooftop area greater than zero.")]
    MissingRooftopArea,

    #[error("Enter an open space area greater than zero.")]
    MissingOpenSpaceArea,

    #[error("Draw your rooftop on the map.")]
    MissingDrawnRooftop,

    #[error("Draw your property boundary or enter the open space area.")]
    MissingDrawnOpenSpace,

    #[error("Select a location.")]
    MissingLocation,

    #[error("Budget must be at least {min} (got {budget}).")]
    BudgetBelowMinimum { budget: Amount, min: Amount },
}

/// Snapshot of the planner form, collected just before submission.
#[derive(Clone, Debug, Default)]
pub struct PlannerModel {
    pub mode: InputMode,

    // Manual entry. In map mode `open_space` is the fallback used when no
    // open space was measured from the drawing.
    pub rooftop: AreaField,
    pub open_space: AreaField,

    // Map entry
    pub drawn: MeasuredAreas,

    pub location: Option<Place>,
    pub budget: Amount,
    pub min_budget: Amount,
}

impl PlannerModel {
    /// Validates the snapshot and builds the request to submit.
    ///
    /// Rules:
    /// - manual mode needs positive rooftop and open space areas
    /// - map mode needs a positive drawn rooftop, and open space from the
    ///   drawing (preferred when positive) or from the manual fallback
    /// - a location is always required
    /// - the budget must not be below the minimum
    pub fn validate_for_submit(&self) -> Result<CalculationRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let (rooftop_area, open_space_area) = match self.mode {
            InputMode::Manual => self.manual_areas(&mut errors),
            InputMode::Map => self.map_areas(&mut errors),
        };

        if self.location.is_none() {
            errors.push(ValidationError::MissingLocation);
        }

        if self.budget < self.min_budget {
            errors.push(ValidationError::BudgetBelowMinimum {
                budget: self.budget,
                min: self.min_budget,
            });
        }

        match (&self.location, rooftop_area, open_space_area) {
            (Some(place), Some(rooftop), Some(open_space)) if errors.is_empty() => Ok(
                CalculationRequest::new(place.position, rooftop, open_space, self.budget),
            ),
            _ => Err(errors),
        }
    }

    fn manual_areas(
        &self,
        errors: &mut Vec<ValidationError>,
    ) -> (Option<f64>, Option<f64>) {
        let rooftop = positive(self.rooftop.square_meters());
        if rooftop.is_none() {
            errors.push(ValidationError::MissingRooftopArea);
        }

        let open_space = positive(self.open_space.square_meters());
        if open_space.is_none() {
            errors.push(ValidationError::MissingOpenSpaceArea);
        }

        (rooftop, open_space)
    }

    fn map_areas(
        &self,
        errors: &mut Vec<ValidationError>,
    ) -> (Option<f64>, Option<f64>) {
        let rooftop = positive(Some(self.drawn.rooftop));
        if rooftop.is_none() {
            errors.push(ValidationError::MissingDrawnRooftop);
        }

        // The drawn figure wins only when it is strictly positive.
        let open_space = positive(Some(self.drawn.open_space))
            .or_else(|| positive(self.open_space.square_meters()));
        if open_space.is_none() {
            errors.push(ValidationError::MissingDrawnOpenSpace);
        }

        (rooftop, open_space)
    }
}

fn positive(area: Option<f64>) -> Option<f64> {
    area.filter(|a| *a > 0.0)
}

impl fmt::Display for PlannerModel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Mode:            {:?}", self.mode)?;
        match self.mode {
            InputMode::Manual => {
                writeln!(
                    f,
                    "Rooftop area:    {}",
                    opt_area_display(self.rooftop.square_meters())
                )?;
                writeln!(
                    f,
                    "Open space area: {}",
                    opt_area_display(self.open_space.square_meters())
                )?;
            }
            InputMode::Map => {
                writeln!(
                    f,
                    "Drawn rooftop:   {}",
                    format_area(self.drawn.rooftop, AreaUnit::SquareMeters)
                )?;
                writeln!(
                    f,
                    "Drawn open area: {}",
                    format_area(self.drawn.open_space, AreaUnit::SquareMeters)
                )?;
            }
        }
        match &self.location {
            Some(place) => writeln!(f, "Location:        {place}")?,
            None => writeln!(f, "Location:        —")?,
        }
        write!(f, "Budget:          {}", self.budget)
    }
}
