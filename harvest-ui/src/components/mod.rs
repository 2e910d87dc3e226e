pub mod planner_form;

pub use planner_form::{PlannerForm, SubmitError};
