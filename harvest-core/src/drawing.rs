//! Map drawing workflow.
//!
//! The user first traces the rooftop, then the property boundary. The SDK
//! does all of the drawing and geometry; this module only decides which tool
//! is active, keeps the traced paths, and recomputes the derived areas.
//!
//! ```text
//! idle ──start──▶ rooftop ──polygon──▶ property ──polygon──▶ complete
//!   ▲                                                           │
//!   └──────────────────────── reset (from any phase) ───────────┘
//! ```

use std::{cell::Cell, fmt, rc::Rc};

use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::MeasuredAreas;
use crate::models::{DrawingPhase, LatLng, PolygonKind};
use crate::sdk::{DrawingSdk, GeometryEngine, ToolLease};

/// User actions the drawing workflow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingEvent {
    Start,
    CompletePolygon,
    EditPath(PolygonKind),
}

impl fmt::Display for DrawingEvent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start drawing"),
            Self::CompletePolygon => f.write_str("complete a polygon"),
            Self::EditPath(kind) => write!(f, "edit the {kind} outline"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawingError {
    #[error("cannot {event} while the drawing phase is {phase}")]
    InvalidTransition {
        phase: DrawingPhase,
        event: DrawingEvent,
    },

    #[error("the {0} outline has not been drawn yet")]
    MissingPolygon(PolygonKind),
}

pub struct DrawingSession {
    sdk: Box<dyn DrawingSdk>,
    geometry: Box<dyn GeometryEngine>,
    phase: DrawingPhase,
    lease: Option<ToolLease>,
    outstanding: Rc<Cell<usize>>,
    rooftop_path: Option<Vec<LatLng>>,
    property_path: Option<Vec<LatLng>>,
    areas: MeasuredAreas,
}

impl DrawingSession {
    pub fn new(
        sdk: Box<dyn DrawingSdk>,
        geometry: Box<dyn GeometryEngine>,
    ) -> Self {
        Self {
            sdk,
            geometry,
            phase: DrawingPhase::Idle,
            lease: None,
            outstanding: Rc::new(Cell::new(0)),
            rooftop_path: None,
            property_path: None,
            areas: MeasuredAreas::default(),
        }
    }

    pub fn phase(&self) -> DrawingPhase {
        self.phase
    }

    pub fn areas(&self) -> MeasuredAreas {
        self.areas
    }

    /// The polygon kind whose tool is currently attached to the map.
    pub fn active_tool(&self) -> Option<PolygonKind> {
        self.lease.as_ref().map(ToolLease::kind)
    }

    /// Number of SDK tools acquired and not yet released.
    pub fn outstanding_tools(&self) -> usize {
        self.outstanding.get()
    }

    pub fn path(
        &self,
        kind: PolygonKind,
    ) -> Option<&[LatLng]> {
        match kind {
            PolygonKind::Rooftop => self.rooftop_path.as_deref(),
            PolygonKind::Property => self.property_path.as_deref(),
        }
    }

    /// Begins tracing the rooftop.
    pub fn start(&mut self) -> Result<(), DrawingError> {
        if self.phase != DrawingPhase::Idle {
            return Err(self.invalid(DrawingEvent::Start));
        }
        self.enter(DrawingPhase::Rooftop);
        Ok(())
    }

    /// Accepts the polygon the active tool just finished and moves on.
    pub fn complete_polygon(
        &mut self,
        path: Vec<LatLng>,
    ) -> Result<(), DrawingError> {
        let Some(kind) = self.phase.polygon() else {
            return Err(self.invalid(DrawingEvent::CompletePolygon));
        };
        debug!(%kind, vertices = path.len(), "polygon completed");
        self.assign(kind, path);

        let next = self.phase.next().unwrap_or(DrawingPhase::Complete);
        self.enter(next);
        Ok(())
    }

    /// Replaces the path of an already drawn polygon, e.g. after the user
    /// drags one of its vertices.
    pub fn edit_path(
        &mut self,
        kind: PolygonKind,
        path: Vec<LatLng>,
    ) -> Result<(), DrawingError> {
        if self.phase == DrawingPhase::Idle {
            return Err(self.invalid(DrawingEvent::EditPath(kind)));
        }
        if self.path(kind).is_none() {
            return Err(DrawingError::MissingPolygon(kind));
        }
        self.assign(kind, path);
        Ok(())
    }

    /// Returns to idle from any phase, discarding both polygons.
    pub fn reset(&mut self) {
        self.lease = None;
        self.rooftop_path = None;
        self.property_path = None;
        self.areas = MeasuredAreas::default();
        self.phase = DrawingPhase::Idle;
        info!("drawing reset");
    }

    fn enter(
        &mut self,
        phase: DrawingPhase,
    ) {
        // Release the previous tool before the SDK is asked for another.
        self.lease = None;
        self.lease = phase
            .polygon()
            .map(|kind| ToolLease::acquire(self.sdk.as_mut(), kind, Rc::clone(&self.outstanding)));
        info!(from = %self.phase, to = %phase, "drawing phase changed");
        self.phase = phase;
    }

    fn assign(
        &mut self,
        kind: PolygonKind,
        path: Vec<LatLng>,
    ) {
        match kind {
            PolygonKind::Rooftop => self.rooftop_path = Some(path),
            PolygonKind::Property => self.property_path = Some(path),
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let rooftop = self
            .rooftop_path
            .as_deref()
            .map(|path| self.geometry.polygon_area(path));
        let property = self
            .property_path
            .as_deref()
            .map(|path| self.geometry.polygon_area(path));
        self.areas = MeasuredAreas::from_polygons(rooftop, property);
        debug!(areas = %self.areas, "areas recomputed");
    }

    fn invalid(
        &self,
        event: DrawingEvent,
    ) -> DrawingError {
        DrawingError::InvalidTransition {
            phase: self.phase,
            event,
        }
    }
}

impl fmt::Debug for DrawingSession {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("DrawingSession")
            .field("phase", &self.phase)
            .field("lease", &self.lease)
            .field("areas", &self.areas)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::PolygonStyle;
    use crate::sdk::DrawingTool;

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingTool {
        kind: PolygonKind,
        log: Log,
    }

    impl DrawingTool for RecordingTool {
        fn release(&mut self) {
            self.log.borrow_mut().push(format!("release {}", self.kind));
        }
    }

    struct RecordingSdk {
        log: Log,
    }

    impl DrawingSdk for RecordingSdk {
        fn activate(
            &mut self,
            kind: PolygonKind,
            _style: &PolygonStyle,
        ) -> Box<dyn DrawingTool> {
            self.log.borrow_mut().push(format!("activate {kind}"));
            Box::new(RecordingTool {
                kind,
                log: Rc::clone(&self.log),
            })
        }
    }

    /// Reports the first vertex's latitude as the polygon's area.
    struct LatitudeAsArea;

    impl GeometryEngine for LatitudeAsArea {
        fn polygon_area(
            &self,
            path: &[LatLng],
        ) -> f64 {
            path.first().map_or(0.0, |p| p.latitude)
        }
    }

    fn polygon(area: f64) -> Vec<LatLng> {
        vec![
            LatLng::new(area, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ]
    }

    fn session() -> (DrawingSession, Log) {
        let log: Log = Rc::default();
        let sdk = RecordingSdk {
            log: Rc::clone(&log),
        };
        (
            DrawingSession::new(Box::new(sdk), Box::new(LatitudeAsArea)),
            log,
        )
    }

    #[test]
    fn full_walkthrough_swaps_tools_in_order() {
        let (mut drawing, log) = session();

        drawing.start().unwrap();
        assert_eq!(drawing.active_tool(), Some(PolygonKind::Rooftop));
        drawing.complete_polygon(polygon(120.0)).unwrap();
        assert_eq!(drawing.phase(), DrawingPhase::Property);
        assert_eq!(drawing.active_tool(), Some(PolygonKind::Property));
        drawing.complete_polygon(polygon(300.0)).unwrap();

        assert_eq!(drawing.phase(), DrawingPhase::Complete);
        assert_eq!(drawing.active_tool(), None);
        assert_eq!(drawing.outstanding_tools(), 0);
        assert_eq!(
            *log.borrow(),
            vec![
                "activate rooftop",
                "release rooftop",
                "activate property",
                "release property"
            ]
        );
    }

    #[test]
    fn completed_drawing_reports_open_space() {
        let (mut drawing, _) = session();

        drawing.start().unwrap();
        drawing.complete_polygon(polygon(120.0)).unwrap();
        drawing.complete_polygon(polygon(300.0)).unwrap();

        assert_eq!(drawing.areas().rooftop, 120.0);
        assert_eq!(drawing.areas().open_space, 180.0);
    }

    #[test]
    fn rooftop_only_reports_zero_open_space() {
        let (mut drawing, _) = session();

        drawing.start().unwrap();
        drawing.complete_polygon(polygon(120.0)).unwrap();

        assert_eq!(drawing.areas().rooftop, 120.0);
        assert_eq!(drawing.areas().open_space, 0.0);
    }

    #[test]
    fn editing_a_path_recomputes_areas() {
        let (mut drawing, _) = session();
        drawing.start().unwrap();
        drawing.complete_polygon(polygon(120.0)).unwrap();
        drawing.complete_polygon(polygon(300.0)).unwrap();

        drawing
            .edit_path(PolygonKind::Rooftop, polygon(320.0))
            .unwrap();

        assert_eq!(drawing.areas().rooftop, 320.0);
        assert_eq!(drawing.areas().open_space, 0.0);
    }

    #[test]
    fn editing_an_undrawn_polygon_is_rejected() {
        let (mut drawing, _) = session();
        drawing.start().unwrap();
        drawing.complete_polygon(polygon(120.0)).unwrap();

        let result = drawing.edit_path(PolygonKind::Property, polygon(300.0));

        assert_eq!(
            result,
            Err(DrawingError::MissingPolygon(PolygonKind::Property))
        );
    }

    #[test]
    fn out_of_order_events_leave_state_untouched() {
        let (mut drawing, _) = session();

        assert_eq!(
            drawing.complete_polygon(polygon(1.0)),
            Err(DrawingError::InvalidTransition {
                phase: DrawingPhase::Idle,
                event: DrawingEvent::CompletePolygon
            })
        );
        assert_eq!(
            drawing.edit_path(PolygonKind::Rooftop, polygon(1.0)),
            Err(DrawingError::InvalidTransition {
                phase: DrawingPhase::Idle,
                event: DrawingEvent::EditPath(PolygonKind::Rooftop)
            })
        );

        drawing.start().unwrap();
        assert_eq!(
            drawing.start(),
            Err(DrawingError::InvalidTransition {
                phase: DrawingPhase::Rooftop,
                event: DrawingEvent::Start
            })
        );

        drawing.complete_polygon(polygon(1.0)).unwrap();
        drawing.complete_polygon(polygon(2.0)).unwrap();
        assert!(drawing.complete_polygon(polygon(3.0)).is_err());
        assert!(drawing.start().is_err());
        assert_eq!(drawing.phase(), DrawingPhase::Complete);
    }

    #[test]
    fn reset_from_every_phase_returns_to_idle() {
        for completed in 0..=2 {
            let (mut drawing, _) = session();
            drawing.start().unwrap();
            for i in 0..completed {
                drawing.complete_polygon(polygon(10.0 * f64::from(i + 1))).unwrap();
            }

            drawing.reset();

            assert_eq!(drawing.phase(), DrawingPhase::Idle);
            assert_eq!(drawing.areas(), MeasuredAreas::default());
            assert_eq!(drawing.outstanding_tools(), 0);
            assert!(drawing.path(PolygonKind::Rooftop).is_none());
            assert!(drawing.path(PolygonKind::Property).is_none());
        }
    }

    #[test]
    fn dropping_the_session_releases_the_active_tool() {
        let (mut drawing, log) = session();
        drawing.start().unwrap();

        drop(drawing);

        assert_eq!(
            *log.borrow(),
            vec!["activate rooftop", "release rooftop"]
        );
    }
}
