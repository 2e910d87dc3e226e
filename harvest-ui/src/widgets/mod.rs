pub mod budget_input;

pub use budget_input::BudgetInput;
