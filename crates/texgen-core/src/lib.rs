//! Texgen Core Library
//!
//! Pointer interaction and node-graph texture generation for the texgen editor.
//!
//! The crate is split in two halves:
//! - `interaction`: an engine-agnostic controller that turns pointer events into a
//!   select/drag state machine and drives any [`GraphEngine`].
//! - `graph`, `raster`, `render`: the built-in engine, a procedural texture node graph
//!   that rasterises itself into RGBA buffers.
//!
//! The `web` feature adds the canvas adapter and the JavaScript-callable engine API.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod graph;
pub mod interaction;
pub mod raster;
pub mod render;

#[cfg(feature = "web")]
pub mod web;

pub use config::{ConfigError, EditorConfig, InteractionSettings};
pub use engine::{DeltaPrecision, EngineError, GraphEngine, NodeId, SurfaceSize};
pub use graph::{GraphError, NodeGraph, NodeKind, Placement, Value};
pub use interaction::{
    CanvasGeometry, CoordinateMapper, DeltaQuantizer, DragSession, DragStateMachine,
    InteractionController, InteractionOutcome, InteractionState, LeavePolicy, OriginConvention,
    PointerDelta, PointerInput, PointerPosition,
};
