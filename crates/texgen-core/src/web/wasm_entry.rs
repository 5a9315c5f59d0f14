//! JavaScript-callable engine API.
//!
//! Lets a plain-JS host draw and drag the built-in graph without the yew client.
//! Every function reports failures as a rejected `JsValue`.

use parking_lot::Mutex;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use super::CanvasEngine;
use crate::config::EditorConfig;
use crate::engine::{EngineError, GraphEngine, NodeId, SurfaceSize};
use crate::graph::NodeGraph;
use crate::interaction::PointerPosition;

// ============================================================================
// Global State
// ============================================================================

/// Engine shared by all exported functions; `None` until [`initialize`] runs.
static ENGINE: Mutex<Option<CanvasEngine>> = Mutex::new(None);

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn with_engine<T>(
    f: impl FnOnce(&mut CanvasEngine) -> Result<T, EngineError>,
) -> Result<T, JsValue> {
    let mut guard = ENGINE.lock();
    let engine = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("Engine not initialized, call initialize() first"))?;
    f(engine).map_err(to_js)
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Builds the demo graph and caches its preview. Replaces any previous engine.
#[wasm_bindgen]
pub fn initialize(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = match config_json {
        Some(json) => EditorConfig::from_json(&json).map_err(to_js)?,
        None => EditorConfig::default(),
    };
    let mut engine = CanvasEngine::new(NodeGraph::demo(&config).map_err(to_js)?);
    engine.initialize().map_err(to_js)?;

    *ENGINE.lock() = Some(engine);
    tracing::info!("[texgen] engine initialized");
    Ok(())
}

// ============================================================================
// Drawing
// ============================================================================

#[wasm_bindgen]
pub fn draw_nodes(ctx: &CanvasRenderingContext2d, width: u32, height: u32) -> Result<(), JsValue> {
    let mut ctx = ctx.clone();
    with_engine(|engine| engine.redraw(&mut ctx, SurfaceSize::new(width, height)))
}

#[wasm_bindgen]
pub fn render_scene(ctx: &CanvasRenderingContext2d, width: u32, height: u32) -> Result<(), JsValue> {
    let mut ctx = ctx.clone();
    with_engine(|engine| engine.render_scene(&mut ctx, SurfaceSize::new(width, height)))
}

// ============================================================================
// Selection & Movement
// ============================================================================

/// Hit-tests canvas-local `(x, y)`; read the result with [`canvas_click_active`].
#[wasm_bindgen]
pub fn canvas_click(ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
    let mut ctx = ctx.clone();
    with_engine(|engine| engine.hit_test(&mut ctx, PointerPosition::new(x, y)))
}

#[wasm_bindgen]
pub fn canvas_click_active() -> Result<Option<u32>, JsValue> {
    with_engine(|engine| Ok(engine.active_selection().map(NodeId::raw)))
}

/// Offsets `node` by `(dx, dy)`; the deltas arrive as `BigInt`.
#[wasm_bindgen]
pub fn move_node(node: u32, dx: i64, dy: i64) -> Result<(), JsValue> {
    with_engine(|engine| {
        engine
            .graph_mut()
            .move_node_by(NodeId::new(node), dx, dy)
            .map_err(EngineError::from)
    })
}

#[wasm_bindgen]
pub fn move_node_to(node: u32, x: i64, y: i64) -> Result<(), JsValue> {
    with_engine(|engine| {
        engine
            .graph_mut()
            .move_node_to(NodeId::new(node), x, y)
            .map_err(EngineError::from)
    })
}
