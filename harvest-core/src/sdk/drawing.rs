use std::{cell::Cell, rc::Rc};

use tracing::debug;

use crate::models::{PolygonKind, PolygonStyle};

/// An active drawing tool handed out by the mapping SDK.
pub trait DrawingTool {
    /// Detaches the tool and its listeners from the map.
    fn release(&mut self);
}

/// Mapping SDK entry point for polygon drawing.
pub trait DrawingSdk {
    /// Attaches a polygon drawing tool to the map, styled for `kind`.
    fn activate(
        &mut self,
        kind: PolygonKind,
        style: &PolygonStyle,
    ) -> Box<dyn DrawingTool>;
}

/// Owned handle to an active drawing tool.
///
/// The tool is released exactly once, when the lease is dropped.
pub struct ToolLease {
    kind: PolygonKind,
    tool: Box<dyn DrawingTool>,
    outstanding: Rc<Cell<usize>>,
}

impl ToolLease {
    /// Activates a tool for `kind` and records it in `outstanding`.
    pub fn acquire(
        sdk: &mut dyn DrawingSdk,
        kind: PolygonKind,
        outstanding: Rc<Cell<usize>>,
    ) -> Self {
        let tool = sdk.activate(kind, &kind.style());
        outstanding.set(outstanding.get() + 1);
        debug!(%kind, "drawing tool acquired");
        Self {
            kind,
            tool,
            outstanding,
        }
    }

    pub fn kind(&self) -> PolygonKind {
        self.kind
    }
}

impl Drop for ToolLease {
    fn drop(&mut self) {
        self.tool.release();
        self.outstanding.set(self.outstanding.get().saturating_sub(1));
        debug!(kind = %self.kind, "drawing tool released");
    }
}

impl std::fmt::Debug for ToolLease {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ToolLease")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
