//! Graph engine contract consumed by the interaction controller.
//!
//! The controller never looks inside an engine: node storage, hit-testing geometry,
//! repositioning and pixel rendering all live behind [`GraphEngine`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::GraphError;
use crate::interaction::{PointerDelta, PointerPosition};

/// Opaque node identifier handed out by a graph engine.
///
/// Only equality is meaningful; "no selection" is expressed as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw value, used when crossing the JavaScript boundary.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Logical drawing-surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Numeric contract of an engine's `move_node` deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaPrecision {
    /// Any `f64` delta is accepted as-is.
    Fractional,
    /// Only whole-pixel deltas are accepted; the controller carries the remainder.
    Whole,
}

/// Failures reported by a graph engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Node storage, hit-testing, movement and rendering, as seen by the controller.
pub trait GraphEngine {
    /// Drawing target passed to hit-testing and rendering calls.
    type Surface: ?Sized;

    /// Whether `move_node` accepts fractional deltas.
    const DELTA_PRECISION: DeltaPrecision = DeltaPrecision::Fractional;

    /// One-time setup, called before any pointer event is processed.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Hit-tests canvas-local `at`; the result is read back with [`Self::active_selection`].
    /// May repaint a selection highlight on `surface`.
    fn hit_test(&mut self, surface: &mut Self::Surface, at: PointerPosition)
    -> Result<(), EngineError>;

    /// Node selected by the most recent `hit_test`, if any.
    fn active_selection(&self) -> Option<NodeId>;

    /// Offsets `node` by `delta`, in the same coordinate space as the hit test.
    fn move_node(&mut self, node: NodeId, delta: PointerDelta) -> Result<(), EngineError>;

    /// Repaints every node at its current position. Safe to call redundantly.
    fn redraw(&mut self, surface: &mut Self::Surface, size: SurfaceSize) -> Result<(), EngineError>;

    /// Secondary drawing operation, unrelated to dragging.
    fn render_scene(
        &mut self,
        surface: &mut Self::Surface,
        size: SurfaceSize,
    ) -> Result<(), EngineError>;
}
