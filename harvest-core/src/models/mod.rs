mod amount;
mod area_unit;
mod calculation_request;
mod drawing_phase;
mod location;

pub use amount::{
    Amount, BudgetBounds, BudgetError, DEFAULT_BUDGET_STEP, DEFAULT_INITIAL_BUDGET,
    DEFAULT_MAX_BUDGET, DEFAULT_MIN_BUDGET, RecommendedSteps,
};
pub use area_unit::{AreaUnit, ParseAreaUnitError};
pub use calculation_request::CalculationRequest;
pub use drawing_phase::{DrawingPhase, InputMode, PolygonKind, PolygonStyle};
pub use location::{DEFAULT_LOCATION, DEFAULT_LOCATION_LABEL, LatLng, Place};
