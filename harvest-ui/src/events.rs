//! Message passing between the form and its sibling components.
//!
//! The place search box, the location detector, the budget widget and the
//! map all report through one channel of [`FormEvent`]s. The form is the only
//! owner of state and applies events strictly one at a time, in arrival
//! order.

use std::sync::Arc;

use harvest_core::{
    Amount, AreaUnit, CalculationConsumer, InputMode, LatLng, LocationResolver, Place,
    PolygonKind, ResolvedLocation,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::components::{PlannerForm, SubmitError};

/// Capacity of the form's event channel.
pub const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ModeChanged(InputMode),
    RooftopTextChanged(String),
    RooftopUnitChanged(AreaUnit),
    OpenSpaceTextChanged(String),
    OpenSpaceUnitChanged(AreaUnit),

    /// A suggestion picked in the place search box.
    PlaceSelected(Place),
    /// Outcome of the initial geolocation lookup.
    LocationResolved(ResolvedLocation),

    BudgetTextEdited(String),
    BudgetBlurred,
    BudgetDragStarted,
    BudgetSlid(Amount),
    BudgetDragEnded,

    DrawingStarted,
    PolygonCompleted(Vec<LatLng>),
    PathEdited(PolygonKind, Vec<LatLng>),
    DrawingReset,

    Submit,
    Reset,
}

/// What happened to the submissions seen while driving the form.
#[derive(Debug, Default)]
pub struct DriveSummary {
    pub submitted: Vec<Amount>,
    pub rejected: Vec<SubmitError>,
}

impl DriveSummary {
    pub fn all_submitted(&self) -> bool {
        self.rejected.is_empty() && !self.submitted.is_empty()
    }
}

pub fn channel() -> (mpsc::Sender<FormEvent>, mpsc::Receiver<FormEvent>) {
    mpsc::channel(EVENT_BUFFER)
}

/// Applies a single event to the form.
///
/// Drawing events that do not fit the current phase are logged and dropped;
/// they never change the form.
pub fn apply(
    form: &mut PlannerForm,
    event: FormEvent,
    consumer: &mut dyn CalculationConsumer,
    summary: &mut DriveSummary,
) {
    debug!(?event, "applying form event");
    let drawing_result = match event {
        FormEvent::ModeChanged(mode) => {
            form.set_mode(mode);
            Ok(())
        }
        FormEvent::RooftopTextChanged(text) => {
            form.set_rooftop_text(text);
            Ok(())
        }
        FormEvent::RooftopUnitChanged(unit) => {
            form.set_rooftop_unit(unit);
            Ok(())
        }
        FormEvent::OpenSpaceTextChanged(text) => {
            form.set_open_space_text(text);
            Ok(())
        }
        FormEvent::OpenSpaceUnitChanged(unit) => {
            form.set_open_space_unit(unit);
            Ok(())
        }
        FormEvent::PlaceSelected(place) => {
            form.set_location(place);
            Ok(())
        }
        FormEvent::LocationResolved(resolved) => {
            form.apply_resolved_location(resolved);
            Ok(())
        }
        FormEvent::BudgetTextEdited(text) => {
            form.budget_mut().edit_text(text);
            Ok(())
        }
        FormEvent::BudgetBlurred => {
            form.budget_mut().blur();
            Ok(())
        }
        FormEvent::BudgetDragStarted => {
            form.budget_mut().begin_drag();
            Ok(())
        }
        FormEvent::BudgetSlid(raw) => {
            form.budget_mut().slide_to(raw);
            Ok(())
        }
        FormEvent::BudgetDragEnded => {
            form.budget_mut().end_drag();
            Ok(())
        }
        FormEvent::DrawingStarted => form.start_drawing(),
        FormEvent::PolygonCompleted(path) => form.complete_polygon(path),
        FormEvent::PathEdited(kind, path) => form.edit_polygon(kind, path),
        FormEvent::DrawingReset => {
            form.reset_drawing();
            Ok(())
        }
        FormEvent::Submit => {
            match form.submit(consumer) {
                Ok(budget) => summary.submitted.push(budget),
                Err(error) => summary.rejected.push(error),
            }
            Ok(())
        }
        FormEvent::Reset => {
            form.reset();
            Ok(())
        }
    };

    if let Err(error) = drawing_result {
        warn!(%error, "drawing event ignored");
    }
}

/// Applies events until every sender has been dropped.
pub async fn drive(
    form: &mut PlannerForm,
    mut events: mpsc::Receiver<FormEvent>,
    consumer: &mut dyn CalculationConsumer,
) -> DriveSummary {
    let mut summary = DriveSummary::default();
    while let Some(event) = events.recv().await {
        apply(form, event, consumer, &mut summary);
    }
    summary
}

/// Starts the initial location lookup in the background.
///
/// The result arrives as [`FormEvent::LocationResolved`]. It is not
/// cancelled if the user picks a place first; whichever event is applied
/// last decides the location.
pub fn spawn_location_detection(
    resolver: Arc<LocationResolver>,
    events: mpsc::Sender<FormEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let resolved = resolver.detect().await;
        if events
            .send(FormEvent::LocationResolved(resolved))
            .await
            .is_err()
        {
            debug!("form closed before location was resolved");
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use harvest_core::{CalculationRequest, DrawingPhase, DrawingSession, LocationSource};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        adapters::{CoordinateGeocoder, HeadlessDrawingSdk, SphericalGeometry, UnsupportedGeolocator},
        widgets::BudgetInput,
    };

    fn form() -> PlannerForm {
        let drawing = DrawingSession::new(
            Box::new(HeadlessDrawingSdk::default()),
            Box::new(SphericalGeometry::default()),
        );
        PlannerForm::new(BudgetInput::default(), drawing)
    }

    fn hyderabad() -> Place {
        Place::new("Hyderabad", LatLng::new(17.385, 78.4867))
    }

    #[tokio::test]
    async fn drives_manual_submission_through_channel() {
        let mut form = form();
        let (tx, rx) = channel();
        for event in [
            FormEvent::RooftopTextChanged("100".into()),
            FormEvent::OpenSpaceTextChanged("50".into()),
            FormEvent::PlaceSelected(hyderabad()),
            FormEvent::BudgetDragStarted,
            FormEvent::BudgetSlid(74_100),
            FormEvent::BudgetDragEnded,
            FormEvent::Submit,
        ] {
            tx.send(event).await.unwrap();
        }
        drop(tx);
        let mut sent = Vec::new();
        let mut consumer = |request: CalculationRequest| -> anyhow::Result<()> {
            sent.push(request);
            Ok(())
        };

        let summary = drive(&mut form, rx, &mut consumer).await;

        assert!(summary.all_submitted());
        assert_eq!(summary.submitted, vec![75_000]);
        assert_eq!(
            sent,
            vec![CalculationRequest::new(hyderabad().position, 100.0, 50.0, 75_000)]
        );
        assert_eq!(form.budget().text(), "₹75k");
    }

    #[tokio::test]
    async fn rejected_submission_is_recorded_and_nothing_is_sent() {
        let mut form = form();
        let (tx, rx) = channel();
        tx.send(FormEvent::OpenSpaceTextChanged("50".into())).await.unwrap();
        tx.send(FormEvent::Submit).await.unwrap();
        drop(tx);
        let mut calls = 0;
        let mut consumer = |_: CalculationRequest| -> anyhow::Result<()> {
            calls += 1;
            Ok(())
        };

        let summary = drive(&mut form, rx, &mut consumer).await;

        assert!(!summary.all_submitted());
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn out_of_order_drawing_events_are_ignored() {
        let mut form = form();
        let (tx, rx) = channel();
        tx.send(FormEvent::PolygonCompleted(Vec::new())).await.unwrap();
        tx.send(FormEvent::DrawingStarted).await.unwrap();
        tx.send(FormEvent::DrawingStarted).await.unwrap();
        drop(tx);
        let mut consumer = |_: CalculationRequest| -> anyhow::Result<()> { Ok(()) };

        drive(&mut form, rx, &mut consumer).await;

        assert_eq!(form.drawing().phase(), DrawingPhase::Rooftop);
    }

    #[tokio::test]
    async fn detected_location_arrives_as_event() {
        let resolver = Arc::new(LocationResolver::new(
            Box::new(UnsupportedGeolocator),
            Box::new(CoordinateGeocoder),
            Place::default_city(),
            Duration::from_millis(10),
        ));
        let (tx, mut rx) = channel();

        spawn_location_detection(resolver, tx).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(FormEvent::LocationResolved(ResolvedLocation {
                place: Place::default_city(),
                source: LocationSource::Fallback,
            }))
        );
    }

    #[tokio::test]
    async fn manual_selection_after_detection_wins() {
        let mut form = form();
        let (tx, rx) = channel();
        tx.send(FormEvent::LocationResolved(ResolvedLocation {
            place: Place::default_city(),
            source: LocationSource::Fallback,
        }))
        .await
        .unwrap();
        tx.send(FormEvent::PlaceSelected(hyderabad())).await.unwrap();
        drop(tx);
        let mut consumer = |_: CalculationRequest| -> anyhow::Result<()> { Ok(()) };

        drive(&mut form, rx, &mut consumer).await;

        assert_eq!(form.location(), Some(&hyderabad()));
    }
}
