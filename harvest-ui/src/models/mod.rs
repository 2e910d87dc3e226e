mod planner_model;

pub use planner_model::{AreaField, PlannerModel, ValidationError};
