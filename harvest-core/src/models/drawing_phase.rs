use std::fmt;

use serde::{Deserialize, Serialize};

/// How the user supplies areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Manual,
    Map,
}

/// Stage of the map-based area capture wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawingPhase {
    #[default]
    Idle,
    Rooftop,
    Property,
    Complete,
}

impl DrawingPhase {
    /// The only forward transition out of this phase, if any.
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Rooftop),
            Self::Rooftop => Some(Self::Property),
            Self::Property => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Which polygon the user is tracing in this phase.
    pub const fn polygon(&self) -> Option<PolygonKind> {
        match self {
            Self::Rooftop => Some(PolygonKind::Rooftop),
            Self::Property => Some(PolygonKind::Property),
            Self::Idle | Self::Complete => None,
        }
    }

    pub const fn instructions(&self) -> &'static str {
        match self {
            Self::Idle => "Start drawing to measure your rooftop and property.",
            Self::Rooftop => "Trace the outline of your rooftop.",
            Self::Property => "Trace the boundary of your whole property.",
            Self::Complete => "Both outlines captured. Edit the shapes or reset to start over.",
        }
    }
}

impl fmt::Display for DrawingPhase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Rooftop => "rooftop",
            Self::Property => "property",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonKind {
    Rooftop,
    Property,
}

impl PolygonKind {
    pub fn style(&self) -> PolygonStyle {
        match self {
            Self::Rooftop => PolygonStyle {
                stroke_color: "#1d4ed8",
                fill_color: "#3b82f6",
                fill_opacity: 0.35,
                editable: true,
            },
            Self::Property => PolygonStyle {
                stroke_color: "#15803d",
                fill_color: "#22c55e",
                fill_opacity: 0.2,
                editable: true,
            },
        }
    }
}

impl fmt::Display for PolygonKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Rooftop => f.write_str("rooftop"),
            Self::Property => f.write_str("property"),
        }
    }
}

/// Visual options passed to the drawing tool when it is activated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub stroke_color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
    pub editable: bool,
}
