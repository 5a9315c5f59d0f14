//! Drag state machine - the whole mutable state of the pointer controller.
//!
//! ## State Transitions
//!
//! ```text
//! Idle     -> Dragging   (down on a node)
//! Idle     -> Idle       (down on empty canvas, any move/up)
//! Dragging -> Dragging   (move: anchor follows the pointer)
//! Dragging -> Idle       (up, leave with release policy, cancel)
//! ```
//!
//! Movement is planned as a [`DragStep`] first and committed separately, so callers
//! can run fallible side effects in between.

use crate::engine::NodeId;

use super::coords::{PointerDelta, PointerPosition};

/// An active drag of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    node: NodeId,
    /// Most recently processed pointer position
    anchor: PointerPosition,
}

impl DragSession {
    pub const fn node(&self) -> NodeId {
        self.node
    }

    pub const fn anchor(&self) -> PointerPosition {
        self.anchor
    }
}

/// Selection/drag status.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No active drag
    #[default]
    Idle,
    /// Dragging exactly one node
    Dragging(DragSession),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            Self::Idle => None,
        }
    }

    /// Node being dragged, if any
    pub fn selected_node(&self) -> Option<NodeId> {
        self.session().map(DragSession::node)
    }
}

/// Whether a planned step keeps the session open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Continue,
    Finish,
}

/// A planned movement, not yet applied to the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub node: NodeId,
    pub delta: PointerDelta,
    pub target: PointerPosition,
    pub kind: StepKind,
}

#[derive(Debug, Clone, Default)]
pub struct DragStateMachine {
    state: InteractionState,
}

impl DragStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Opens a session on `node` anchored at `at`.
    ///
    /// Returns the session it replaced, so a stale drag can never coexist with a new one.
    pub fn begin(&mut self, node: NodeId, at: PointerPosition) -> Option<DragSession> {
        let previous = self.end();
        self.state = InteractionState::Dragging(DragSession { node, anchor: at });
        previous
    }

    /// Plans the step for a pointer at `at`; `None` while idle.
    pub fn plan(&self, at: PointerPosition, kind: StepKind) -> Option<DragStep> {
        let session = self.state.session()?;
        Some(DragStep {
            node: session.node,
            delta: at - session.anchor,
            target: at,
            kind,
        })
    }

    /// Applies a step produced by [`Self::plan`].
    pub fn commit(&mut self, step: &DragStep) {
        match step.kind {
            StepKind::Continue => {
                if let InteractionState::Dragging(session) = &mut self.state {
                    if session.node == step.node {
                        session.anchor = step.target;
                    }
                }
            }
            StepKind::Finish => {
                if self.state.selected_node() == Some(step.node) {
                    self.state = InteractionState::Idle;
                }
            }
        }
    }

    /// Drops the current session, if any.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            InteractionState::Dragging(session) => Some(session),
            InteractionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N7: NodeId = NodeId::new(7);

    #[test]
    fn test_default_state_is_idle() {
        let machine = DragStateMachine::new();
        assert!(machine.state().is_idle());
        assert!(!machine.is_dragging());
        assert_eq!(machine.state().selected_node(), None);
    }

    #[test]
    fn test_plan_while_idle_is_none() {
        let machine = DragStateMachine::new();
        assert_eq!(machine.plan(PointerPosition::new(1.0, 1.0), StepKind::Continue), None);
        assert_eq!(machine.plan(PointerPosition::new(1.0, 1.0), StepKind::Finish), None);
    }

    #[test]
    fn test_begin_opens_session() {
        let mut machine = DragStateMachine::new();
        let replaced = machine.begin(N7, PointerPosition::new(50.0, 50.0));

        assert_eq!(replaced, None);
        assert_eq!(machine.state().selected_node(), Some(N7));
        assert_eq!(
            machine.state().session().map(DragSession::anchor),
            Some(PointerPosition::new(50.0, 50.0))
        );
    }

    #[test]
    fn test_begin_replaces_stale_session() {
        let mut machine = DragStateMachine::new();
        machine.begin(NodeId::new(1), PointerPosition::new(0.0, 0.0));
        let replaced = machine.begin(NodeId::new(2), PointerPosition::new(5.0, 5.0));

        assert_eq!(replaced.map(|s| s.node()), Some(NodeId::new(1)));
        assert_eq!(machine.state().selected_node(), Some(NodeId::new(2)));
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let mut machine = DragStateMachine::new();
        machine.begin(N7, PointerPosition::new(50.0, 50.0));

        let step = machine
            .plan(PointerPosition::new(60.0, 55.0), StepKind::Continue)
            .unwrap();
        assert_eq!(step.delta, PointerDelta::new(10.0, 5.0));

        // Planning again without a commit yields the same delta.
        let again = machine
            .plan(PointerPosition::new(60.0, 55.0), StepKind::Continue)
            .unwrap();
        assert_eq!(again, step);
    }

    #[test]
    fn test_commit_continue_moves_anchor() {
        let mut machine = DragStateMachine::new();
        machine.begin(N7, PointerPosition::new(50.0, 50.0));

        let step = machine
            .plan(PointerPosition::new(60.0, 55.0), StepKind::Continue)
            .unwrap();
        machine.commit(&step);

        let next = machine
            .plan(PointerPosition::new(60.0, 60.0), StepKind::Finish)
            .unwrap();
        assert_eq!(next.delta, PointerDelta::new(0.0, 5.0));
        assert!(machine.is_dragging());
    }

    #[test]
    fn test_commit_finish_returns_to_idle() {
        let mut machine = DragStateMachine::new();
        machine.begin(N7, PointerPosition::new(50.0, 50.0));

        let step = machine
            .plan(PointerPosition::new(70.0, 50.0), StepKind::Finish)
            .unwrap();
        machine.commit(&step);

        assert!(machine.state().is_idle());
    }

    #[test]
    fn test_stale_step_from_previous_session_is_ignored() {
        let mut machine = DragStateMachine::new();
        machine.begin(NodeId::new(1), PointerPosition::new(0.0, 0.0));
        let stale = machine
            .plan(PointerPosition::new(10.0, 10.0), StepKind::Finish)
            .unwrap();

        machine.begin(NodeId::new(2), PointerPosition::new(3.0, 3.0));
        machine.commit(&stale);

        assert_eq!(machine.state().selected_node(), Some(NodeId::new(2)));
    }

    #[test]
    fn test_end() {
        let mut machine = DragStateMachine::new();
        assert_eq!(machine.end(), None);

        machine.begin(N7, PointerPosition::new(1.0, 2.0));
        let ended = machine.end();
        assert_eq!(ended.map(|s| s.node()), Some(N7));
        assert!(machine.state().is_idle());
    }
}
