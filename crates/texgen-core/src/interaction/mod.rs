//! Pointer interaction for the node canvas.
//!
//! ## Architecture
//!
//! A pointer event flows through three stages:
//!
//! ```text
//! raw event -> CoordinateMapper -> DragStateMachine (plan) -> GraphEngine calls -> commit
//! ```
//!
//! The state machine only plans a step; the controller commits it once the engine has
//! accepted the move, so an engine failure never leaves the state ahead of node positions.
//!
//! ## Modules
//!
//! - `coords` - pointer positions, deltas and canvas-local coordinate mapping
//! - `state` - `InteractionState` and the drag state machine
//! - `quantize` - whole-pixel delta conversion with remainder carry
//! - `controller` - event entry points and engine side effects

mod controller;
mod coords;
mod quantize;
mod state;

pub use controller::{InteractionController, InteractionOutcome, LeavePolicy};
pub use coords::{
    CanvasGeometry, CoordinateMapper, OriginConvention, PointerDelta, PointerInput,
    PointerPosition,
};
pub use quantize::{DeltaQuantizer, QuantizedDelta};
pub use state::{DragSession, DragStateMachine, DragStep, InteractionState, StepKind};
