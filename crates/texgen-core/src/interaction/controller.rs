//! Pointer event entry points and the engine side effects of each transition.
//!
//! Per event the controller issues at most one hit test, one move and one redraw.

use serde::{Deserialize, Serialize};

use crate::config::InteractionSettings;
use crate::engine::{DeltaPrecision, EngineError, GraphEngine, NodeId, SurfaceSize};

use super::coords::{CanvasGeometry, CoordinateMapper, PointerDelta, PointerInput, PointerPosition};
use super::quantize::DeltaQuantizer;
use super::state::{DragStateMachine, DragStep, InteractionState, StepKind};

/// What to do when the pointer leaves the canvas mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePolicy {
    /// Treat the leave as a pointer-up at the leave position.
    #[default]
    Release,
    /// Ignore the leave; the host keeps receiving events through pointer capture.
    Keep,
}

/// Result of processing one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// No transition for this event in the current state.
    Ignored,
    /// Pointer-down did not hit a node.
    Missed,
    /// Pointer-down selected a node and opened a drag.
    Selected(NodeId),
    /// The dragged node moved by `delta` (as handed to the engine).
    Moved { node: NodeId, delta: PointerDelta },
    /// The drag ended after a final move by `delta`.
    Released { node: NodeId, delta: PointerDelta },
    /// The drag was dropped without moving.
    Cancelled(NodeId),
}

/// Drives a [`GraphEngine`] from a stream of pointer events on one canvas.
pub struct InteractionController<E: GraphEngine> {
    engine: E,
    machine: DragStateMachine,
    mapper: CoordinateMapper,
    quantizer: DeltaQuantizer,
    leave_policy: LeavePolicy,
    size: SurfaceSize,
}

impl<E: GraphEngine> InteractionController<E> {
    /// Initializes `engine` and binds it to a surface of fixed logical `size`.
    pub fn new(
        mut engine: E,
        settings: &InteractionSettings,
        size: SurfaceSize,
    ) -> Result<Self, EngineError> {
        engine.initialize()?;
        tracing::info!(
            "Interaction controller ready: {}x{}, origin={:?}, leave={:?}",
            size.width,
            size.height,
            settings.origin,
            settings.leave
        );

        Ok(Self {
            engine,
            machine: DragStateMachine::new(),
            mapper: CoordinateMapper::new(settings.origin),
            quantizer: DeltaQuantizer::new(),
            leave_policy: settings.leave,
            size,
        })
    }

    pub fn state(&self) -> &InteractionState {
        self.machine.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.is_dragging()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Full repaint, used for the initial frame.
    pub fn redraw(&mut self, surface: &mut E::Surface) -> Result<(), EngineError> {
        self.engine.redraw(surface, self.size)
    }

    pub fn pointer_down(
        &mut self,
        surface: &mut E::Surface,
        input: PointerInput,
        geometry: &CanvasGeometry,
    ) -> Result<InteractionOutcome, EngineError> {
        let at = self.mapper.map(input, geometry);
        self.down_at(surface, at)
    }

    pub fn pointer_move(
        &mut self,
        surface: &mut E::Surface,
        input: PointerInput,
        geometry: &CanvasGeometry,
    ) -> Result<InteractionOutcome, EngineError> {
        if !self.machine.is_dragging() {
            return Ok(InteractionOutcome::Ignored);
        }
        let at = self.mapper.map(input, geometry);
        self.move_at(surface, at)
    }

    pub fn pointer_up(
        &mut self,
        surface: &mut E::Surface,
        input: PointerInput,
        geometry: &CanvasGeometry,
    ) -> Result<InteractionOutcome, EngineError> {
        if !self.machine.is_dragging() {
            return Ok(InteractionOutcome::Ignored);
        }
        let at = self.mapper.map(input, geometry);
        self.up_at(surface, at)
    }

    pub fn pointer_leave(
        &mut self,
        surface: &mut E::Surface,
        input: PointerInput,
        geometry: &CanvasGeometry,
    ) -> Result<InteractionOutcome, EngineError> {
        if !self.machine.is_dragging() {
            return Ok(InteractionOutcome::Ignored);
        }
        let at = self.mapper.map(input, geometry);
        self.leave_at(surface, at)
    }

    /// Pointer-down at an already mapped position.
    pub fn down_at(
        &mut self,
        surface: &mut E::Surface,
        at: PointerPosition,
    ) -> Result<InteractionOutcome, EngineError> {
        self.engine.hit_test(surface, at)?;
        let selection = self.engine.active_selection();

        // State changes only once the hit test has succeeded.
        if let Some(stale) = self.machine.end() {
            tracing::debug!("Discarding stale drag of {} before new pointer-down", stale.node());
        }
        self.quantizer.reset();

        let Some(node) = selection else {
            tracing::trace!("Pointer-down at ({}, {}) hit nothing", at.x, at.y);
            return Ok(InteractionOutcome::Missed);
        };

        self.machine.begin(node, at);
        tracing::debug!("Drag started on {} at ({}, {})", node, at.x, at.y);
        Ok(InteractionOutcome::Selected(node))
    }

    /// Pointer-move at an already mapped position.
    pub fn move_at(
        &mut self,
        surface: &mut E::Surface,
        at: PointerPosition,
    ) -> Result<InteractionOutcome, EngineError> {
        let Some(step) = self.machine.plan(at, StepKind::Continue) else {
            tracing::trace!("Pointer-move ignored while idle");
            return Ok(InteractionOutcome::Ignored);
        };

        let delta = self.apply_step(surface, &step)?;
        Ok(InteractionOutcome::Moved {
            node: step.node,
            delta,
        })
    }

    /// Pointer-up at an already mapped position.
    pub fn up_at(
        &mut self,
        surface: &mut E::Surface,
        at: PointerPosition,
    ) -> Result<InteractionOutcome, EngineError> {
        let Some(step) = self.machine.plan(at, StepKind::Finish) else {
            tracing::trace!("Pointer-up ignored while idle");
            return Ok(InteractionOutcome::Ignored);
        };

        let delta = self.apply_step(surface, &step)?;
        tracing::debug!("Drag of {} released at ({}, {})", step.node, at.x, at.y);
        Ok(InteractionOutcome::Released {
            node: step.node,
            delta,
        })
    }

    /// Pointer-leave at an already mapped position.
    pub fn leave_at(
        &mut self,
        surface: &mut E::Surface,
        at: PointerPosition,
    ) -> Result<InteractionOutcome, EngineError> {
        match self.leave_policy {
            LeavePolicy::Release => self.up_at(surface, at),
            LeavePolicy::Keep => Ok(InteractionOutcome::Ignored),
        }
    }

    /// Pointer-cancel: drops the drag without touching the engine.
    pub fn pointer_cancel(&mut self) -> InteractionOutcome {
        match self.machine.end() {
            Some(session) => {
                self.quantizer.reset();
                tracing::debug!("Drag of {} cancelled", session.node());
                InteractionOutcome::Cancelled(session.node())
            }
            None => InteractionOutcome::Ignored,
        }
    }

    /// Moves the node, commits the step, then redraws. Returns the delta given to the engine.
    fn apply_step(
        &mut self,
        surface: &mut E::Surface,
        step: &DragStep,
    ) -> Result<PointerDelta, EngineError> {
        let delta = match E::DELTA_PRECISION {
            DeltaPrecision::Fractional => {
                self.engine.move_node(step.node, step.delta)?;
                step.delta
            }
            DeltaPrecision::Whole => {
                let quantized = self.quantizer.quantize(step.delta);
                self.engine.move_node(step.node, quantized.whole)?;
                self.quantizer.commit(&quantized);
                quantized.whole
            }
        };

        self.machine.commit(step);
        if step.kind == StepKind::Finish {
            self.quantizer.reset();
        }

        self.engine.redraw(surface, self.size)?;
        Ok(delta)
    }
}
