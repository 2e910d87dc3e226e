//! Wiring between configuration, the planner form and its collaborators.
//!
//! Each run feeds a scripted sequence of [`FormEvent`]s through the same
//! channel an interactive front end would use.

use std::{fs, path::Path, sync::Arc};

use anyhow::Context;
use harvest_core::{
    Amount, CalculationConsumer, DrawingSession, InputMode, LatLng, LocationResolver, Place,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    adapters::{CoordinateGeocoder, HeadlessDrawingSdk, SphericalGeometry, UnsupportedGeolocator},
    components::{PlannerForm, SubmitError},
    config::AppConfig,
    csv_loader::BatchPlan,
    events::{self, DriveSummary, FormEvent},
    models::AreaField,
};

/// Builds an empty planner form from configuration.
pub fn build_form(config: &AppConfig) -> anyhow::Result<PlannerForm> {
    let budget = config
        .budget
        .build_input()
        .context("Invalid budget configuration")?;
    let drawing = DrawingSession::new(
        Box::new(HeadlessDrawingSdk::default()),
        Box::new(SphericalGeometry::default()),
    );
    Ok(PlannerForm::new(budget, drawing))
}

pub fn build_resolver(config: &AppConfig) -> LocationResolver {
    LocationResolver::new(
        Box::new(UnsupportedGeolocator),
        Box::new(CoordinateGeocoder),
        config.location.fallback_place(),
        config.location.geolocation_timeout(),
    )
}

/// Inputs for a manual-entry run.
#[derive(Debug, Clone, Default)]
pub struct ManualPlan {
    pub rooftop: AreaField,
    pub open_space: AreaField,
    /// Budget text as the user would type it.
    pub budget: Option<String>,
    /// Overrides the detected location.
    pub location: Option<LatLng>,
}

/// Outlines captured on the map, as read from a polygon file.
///
/// ```json
/// {
///   "rooftop": [{"latitude": 12.97, "longitude": 77.59}, ...],
///   "property": [{"latitude": 12.97, "longitude": 77.59}, ...]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PolygonFile {
    pub rooftop: Vec<LatLng>,
    #[serde(default)]
    pub property: Option<Vec<LatLng>>,
}

impl PolygonFile {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Failed to parse polygon file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read polygon file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid polygon file: {}", path.display()))
    }
}

/// Inputs for a map-drawing run.
#[derive(Debug, Clone)]
pub struct MapPlan {
    pub polygons: PolygonFile,
    /// Typed open space, used when the drawing yields none.
    pub open_space: AreaField,
    pub budget: Option<String>,
    pub location: Option<LatLng>,
}

fn budget_events(
    budget: Option<String>,
    events: &mut Vec<FormEvent>,
) {
    if let Some(text) = budget {
        events.push(FormEvent::BudgetTextEdited(text));
        events.push(FormEvent::BudgetBlurred);
    }
}

fn location_events(
    location: Option<LatLng>,
    events: &mut Vec<FormEvent>,
) {
    if let Some(position) = location {
        events.push(FormEvent::PlaceSelected(Place::unlabelled(position)));
    }
}

impl ManualPlan {
    fn into_events(self) -> Vec<FormEvent> {
        let mut events = vec![
            FormEvent::ModeChanged(InputMode::Manual),
            FormEvent::RooftopTextChanged(self.rooftop.text),
            FormEvent::RooftopUnitChanged(self.rooftop.unit),
            FormEvent::OpenSpaceTextChanged(self.open_space.text),
            FormEvent::OpenSpaceUnitChanged(self.open_space.unit),
        ];
        location_events(self.location, &mut events);
        budget_events(self.budget, &mut events);
        events.push(FormEvent::Submit);
        events
    }
}

impl MapPlan {
    fn into_events(self) -> Vec<FormEvent> {
        let mut events = vec![
            FormEvent::ModeChanged(InputMode::Map),
            FormEvent::OpenSpaceTextChanged(self.open_space.text),
            FormEvent::OpenSpaceUnitChanged(self.open_space.unit),
            FormEvent::DrawingStarted,
            FormEvent::PolygonCompleted(self.polygons.rooftop),
        ];
        if let Some(property) = self.polygons.property {
            events.push(FormEvent::PolygonCompleted(property));
        }
        location_events(self.location, &mut events);
        budget_events(self.budget, &mut events);
        events.push(FormEvent::Submit);
        events
    }
}

/// Runs one form session: location detection first, then `script`.
async fn run_session(
    config: &AppConfig,
    script: Vec<FormEvent>,
    consumer: &mut dyn CalculationConsumer,
) -> anyhow::Result<DriveSummary> {
    let mut form = build_form(config)?;
    let resolver = Arc::new(build_resolver(config));
    let (tx, rx) = events::channel();

    let feeder = async move {
        // Detection is awaited so that a place given on the command line
        // is applied after it and wins.
        events::spawn_location_detection(resolver, tx.clone())
            .await
            .context("location detection task failed")?;
        for event in script {
            tx.send(event)
                .await
                .context("planner form stopped accepting events")?;
        }
        anyhow::Ok(())
    };

    let (summary, fed) = tokio::join!(events::drive(&mut form, rx, consumer), feeder);
    fed?;
    Ok(summary)
}

pub async fn run_manual(
    config: &AppConfig,
    plan: ManualPlan,
    consumer: &mut dyn CalculationConsumer,
) -> anyhow::Result<DriveSummary> {
    info!("Planning from manually entered areas");
    run_session(config, plan.into_events(), consumer).await
}

pub async fn run_map(
    config: &AppConfig,
    plan: MapPlan,
    consumer: &mut dyn CalculationConsumer,
) -> anyhow::Result<DriveSummary> {
    info!(
        rooftop_vertices = plan.polygons.rooftop.len(),
        has_property = plan.polygons.property.is_some(),
        "Planning from drawn outlines"
    );
    run_session(config, plan.into_events(), consumer).await
}

/// Outcome of a batch run, keyed by data row number.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub submitted: Vec<(usize, Amount)>,
    pub rejected: Vec<(usize, SubmitError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Submits every plan through a single form, resetting it between rows.
pub fn run_batch(
    config: &AppConfig,
    plans: Vec<BatchPlan>,
    consumer: &mut dyn CalculationConsumer,
) -> anyhow::Result<BatchReport> {
    let mut form = build_form(config)?;
    let mut report = BatchReport::default();
    info!(rows = plans.len(), "Planning batch");

    for plan in plans {
        let row = plan.row;
        let mut script = vec![FormEvent::Reset];
        script.extend(
            ManualPlan {
                rooftop: plan.rooftop,
                open_space: plan.open_space,
                budget: plan.budget.map(|amount| amount.to_string()),
                location: Some(plan.location),
            }
            .into_events(),
        );

        let mut summary = DriveSummary::default();
        for event in script {
            events::apply(&mut form, event, consumer, &mut summary);
        }

        if let Some(amount) = summary.submitted.pop() {
            debug!(row, amount, "row submitted");
            report.submitted.push((row, amount));
        }
        report
            .rejected
            .extend(summary.rejected.into_iter().map(|error| (row, error)));
    }

    info!(
        submitted = report.submitted.len(),
        rejected = report.rejected.len(),
        "Batch finished"
    );
    Ok(report)
}
