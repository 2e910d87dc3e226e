pub mod adapters;
pub mod app;
pub mod components;
pub mod config;
pub mod csv_loader;
pub mod events;
pub mod logging;
pub mod models;
pub mod utils;
pub mod widgets;

pub use components::{PlannerForm, SubmitError};
pub use config::AppConfig;
pub use events::FormEvent;
