//! Node canvas: drag nodes of the texture graph with the pointer.
//!
//! The interaction controller lives in a `use_mut_ref` slot so pointer events never
//! trigger a yew re-render; the engine paints the canvas directly.

use std::cell::RefCell;
use std::rc::Rc;

use texgen_core::web::{self, CanvasEngine};
use texgen_core::{
    CanvasGeometry, EditorConfig, EngineError, InteractionController, InteractionOutcome,
    InteractionState, NodeGraph, PointerInput,
};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::error::ClientError;
use crate::util::context_2d;

type Controller = InteractionController<CanvasEngine>;

type PointerHandler = fn(
    &mut Controller,
    &mut CanvasRenderingContext2d,
    PointerInput,
    &CanvasGeometry,
) -> Result<InteractionOutcome, EngineError>;

/// Controller plus the context it paints on.
struct CanvasSession {
    controller: Controller,
    ctx: CanvasRenderingContext2d,
}

#[derive(Properties, PartialEq)]
pub struct NodeCanvasProps {
    pub config: EditorConfig,
}

/// Cursor shown over the canvas for a controller state.
pub fn cursor_for(state: &InteractionState) -> &'static str {
    if state.is_dragging() { "grabbing" } else { "grab" }
}

fn mount(canvas: &HtmlCanvasElement, config: &EditorConfig) -> Result<CanvasSession, ClientError> {
    let size = config.canvas;
    canvas.set_width(size.width);
    canvas.set_height(size.height);

    let mut ctx = context_2d(canvas)?;
    let engine = CanvasEngine::new(NodeGraph::demo(config)?);
    let mut controller = InteractionController::new(engine, &config.interaction, size)?;
    controller.redraw(&mut ctx)?;

    Ok(CanvasSession { controller, ctx })
}

fn set_cursor(canvas: &HtmlCanvasElement, state: &InteractionState) {
    if let Err(err) = canvas.style().set_property("cursor", cursor_for(state)) {
        tracing::trace!("Failed to set cursor: {:?}", err);
    }
}

fn pointer_callback(
    canvas_ref: NodeRef,
    session: Rc<RefCell<Option<CanvasSession>>>,
    event_name: &'static str,
    handler: PointerHandler,
) -> Callback<PointerEvent> {
    Callback::from(move |e: PointerEvent| {
        let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let mut guard = session.borrow_mut();
        let Some(CanvasSession { controller, ctx }) = guard.as_mut() else {
            return;
        };

        if event_name == "pointerdown" {
            if let Err(err) = canvas.set_pointer_capture(e.pointer_id()) {
                tracing::warn!("Pointer capture failed: {:?}", err);
            }
        }

        let geometry = web::geometry_of(&canvas);
        match handler(controller, ctx, web::pointer_input(&e), &geometry) {
            Ok(InteractionOutcome::Ignored) => {}
            Ok(outcome) => tracing::debug!("{}: {:?}", event_name, outcome),
            Err(err) => tracing::error!("{} failed: {}", event_name, err),
        }
        set_cursor(&canvas, controller.state());
    })
}

#[function_component(NodeCanvas)]
pub fn node_canvas(props: &NodeCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(|| None::<CanvasSession>);

    // Build the engine and controller once the canvas exists; rebuild on config change.
    {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        use_effect_with(props.config.clone(), move |config| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                match mount(&canvas, config) {
                    Ok(mounted) => {
                        set_cursor(&canvas, mounted.controller.state());
                        *session.borrow_mut() = Some(mounted);
                    }
                    Err(err) => tracing::error!("Failed to start node canvas: {}", err),
                }
            }
            move || {
                session.borrow_mut().take();
            }
        });
    }

    let onpointerdown = pointer_callback(
        canvas_ref.clone(),
        session.clone(),
        "pointerdown",
        Controller::pointer_down,
    );
    let onpointermove = pointer_callback(
        canvas_ref.clone(),
        session.clone(),
        "pointermove",
        Controller::pointer_move,
    );
    let onpointerup = pointer_callback(
        canvas_ref.clone(),
        session.clone(),
        "pointerup",
        Controller::pointer_up,
    );
    let onpointerleave = pointer_callback(
        canvas_ref.clone(),
        session.clone(),
        "pointerleave",
        Controller::pointer_leave,
    );

    let onpointercancel = {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        Callback::from(move |_: PointerEvent| {
            let mut guard = session.borrow_mut();
            let Some(CanvasSession { controller, .. }) = guard.as_mut() else {
                return;
            };
            let outcome = controller.pointer_cancel();
            tracing::debug!("pointercancel: {:?}", outcome);
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                set_cursor(&canvas, controller.state());
            }
        })
    };

    html! {
        <canvas
            ref={canvas_ref}
            class="node-canvas"
            {onpointerdown}
            {onpointermove}
            {onpointerup}
            {onpointerleave}
            {onpointercancel}
        />
    }
}
