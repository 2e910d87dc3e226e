use harvest_core::{
    Amount, AreaUnit, CalculationConsumer, DrawingError, DrawingSession, InputMode, LatLng,
    Place, PolygonKind, ResolvedLocation, calculations::MeasuredAreas,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    models::{AreaField, PlannerModel, ValidationError},
    widgets::BudgetInput,
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("cannot submit: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("calculation request was not accepted: {0}")]
    Consumer(anyhow::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The top-level planning form: owns every input, the budget widget and the
/// map drawing session, and submits the result to the recommendation engine.
#[derive(Debug)]
pub struct PlannerForm {
    mode: InputMode,
    rooftop: AreaField,
    open_space: AreaField,
    location: Option<Place>,
    budget: BudgetInput,
    drawing: DrawingSession,
}

impl PlannerForm {
    pub fn new(
        budget: BudgetInput,
        drawing: DrawingSession,
    ) -> Self {
        Self {
            mode: InputMode::default(),
            rooftop: AreaField::default(),
            open_space: AreaField::default(),
            location: None,
            budget,
            drawing,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn location(&self) -> Option<&Place> {
        self.location.as_ref()
    }

    pub fn budget(&self) -> &BudgetInput {
        &self.budget
    }

    pub fn budget_mut(&mut self) -> &mut BudgetInput {
        &mut self.budget
    }

    pub fn drawing(&self) -> &DrawingSession {
        &self.drawing
    }

    pub fn drawing_mut(&mut self) -> &mut DrawingSession {
        &mut self.drawing
    }

    pub fn set_mode(
        &mut self,
        mode: InputMode,
    ) {
        info!(?mode, "input mode changed");
        self.mode = mode;
    }

    pub fn set_rooftop_text(
        &mut self,
        text: impl Into<String>,
    ) {
        self.rooftop.text = text.into();
    }

    pub fn set_rooftop_unit(
        &mut self,
        unit: AreaUnit,
    ) {
        self.rooftop.unit = unit;
    }

    pub fn set_open_space_text(
        &mut self,
        text: impl Into<String>,
    ) {
        self.open_space.text = text.into();
    }

    pub fn set_open_space_unit(
        &mut self,
        unit: AreaUnit,
    ) {
        self.open_space.unit = unit;
    }

    /// Replaces the current location. Whichever source writes last wins.
    pub fn set_location(
        &mut self,
        place: Place,
    ) {
        info!(%place, "location set");
        self.location = Some(place);
    }

    pub fn apply_resolved_location(
        &mut self,
        resolved: ResolvedLocation,
    ) {
        info!(source = ?resolved.source, "location resolved");
        self.set_location(resolved.place);
    }

    pub fn start_drawing(&mut self) -> Result<(), DrawingError> {
        self.drawing.start()
    }

    pub fn complete_polygon(
        &mut self,
        path: Vec<LatLng>,
    ) -> Result<(), DrawingError> {
        self.drawing.complete_polygon(path)
    }

    pub fn edit_polygon(
        &mut self,
        kind: PolygonKind,
        path: Vec<LatLng>,
    ) -> Result<(), DrawingError> {
        self.drawing.edit_path(kind, path)
    }

    pub fn reset_drawing(&mut self) {
        self.drawing.reset();
    }

    pub fn drawn_areas(&self) -> MeasuredAreas {
        self.drawing.areas()
    }

    /// Collects the current inputs into a [`PlannerModel`].
    pub fn to_model(&self) -> PlannerModel {
        PlannerModel {
            mode: self.mode,
            rooftop: self.rooftop.clone(),
            open_space: self.open_space.clone(),
            drawn: self.drawing.areas(),
            location: self.location.clone(),
            budget: self.budget.value(),
            min_budget: self.budget.bounds().min(),
        }
    }

    /// Validates the form and, if it passes, hands the request to `consumer`.
    ///
    /// Nothing is sent when validation fails, and the form is left as it was.
    pub fn submit(
        &self,
        consumer: &mut dyn CalculationConsumer,
    ) -> Result<Amount, SubmitError> {
        let model = self.to_model();
        let request = match model.validate_for_submit() {
            Ok(request) => request,
            Err(errors) => {
                warn!("Cannot submit form due to validation errors");
                for error in &errors {
                    warn!(%error, "validation error");
                }
                return Err(SubmitError::Invalid(errors));
            }
        };

        info!(%model, "Form validated");
        let budget = request.budget();
        consumer.consume(request).map_err(SubmitError::Consumer)?;
        Ok(budget)
    }

    /// Returns the form to the state [`PlannerForm::new`] leaves it in:
    /// inputs, drawing and location cleared, budget back to its initial value.
    pub fn reset(&mut self) {
        self.mode = InputMode::default();
        self.rooftop = AreaField::default();
        self.open_space = AreaField::default();
        self.location = None;
        self.budget.reset();
        self.drawing.reset();
    }
}
