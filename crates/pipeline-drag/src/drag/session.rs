//! Drag session state machine
//!
//! ```text
//!            pointer_down on a node
//!   ┌──────┐ ───────────────────────▶ ┌──────────┐ ◀─┐
//!   │ Idle │                          │ Dragging │   │ pointer_move
//!   └──────┘ ◀─────────────────────── └──────────┘ ──┘
//!            pointer_up / pointer_leave
//!            (commit to the move-log)
//! ```

use tracing::{debug, info, span, trace, warn, Level};

use super::tracker::{self, Grab};
use crate::core::{Point, Result, ScreenTransform};
use crate::diagram::{Diagram, NodeId, DRAGGABLE_CLASS, NODE_TAG};
use crate::document::AttributeChange;
use crate::export::{self, ExportOutcome, MoveEntry, MoveLog, SaveSink};
use crate::routing::{ConnectorRouter, RerouteReport};

/// Pointer position as reported by the host, with the surface transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub transform: ScreenTransform,
}

impl PointerSample {
    pub fn new(client_x: f64, client_y: f64, transform: ScreenTransform) -> Self {
        Self {
            client_x,
            client_y,
            transform,
        }
    }

    /// A sample on an untransformed surface
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, ScreenTransform::IDENTITY)
    }

    /// Position in diagram space, `None` for a singular transform
    pub fn local(&self) -> Option<Point> {
        self.transform.to_local(self.client_x, self.client_y)
    }
}

/// Pointer input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent<'a> {
    Down {
        /// `id` of the element under the pointer
        target: &'a str,
        pointer: PointerSample,
    },
    Move(PointerSample),
    Up,
    Leave,
}

/// Whether a drag is in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Grab),
}

/// What handling an event did
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Nothing changed
    Ignored,
    /// A node was grabbed
    Started(NodeId),
    /// The grabbed node moved and its connectors were rerouted
    Moved(RerouteReport),
    /// The drag ended and the node's position was recorded
    Committed(MoveEntry),
}

/// Owns a diagram and turns pointer input into edits
///
/// Every edit is also kept as an [`AttributeChange`] until drained with
/// [`DragController::take_changes`]. A host that never drains them should call
/// [`DragController::set_change_recording`] with `false`.
#[derive(Debug)]
pub struct DragController {
    diagram: Diagram,
    router: ConnectorRouter,
    state: DragState,
    move_log: MoveLog,
    initial_report: RerouteReport,
}

impl DragController {
    /// Take ownership of `diagram` and bring every connector into agreement
    /// with the node positions
    pub fn new(mut diagram: Diagram) -> Self {
        let router = ConnectorRouter::new();
        let initial_report = router.reroute_all(&mut diagram);
        Self {
            diagram,
            router,
            state: DragState::Idle,
            move_log: MoveLog::new(),
            initial_report,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    /// The routing pass run when the controller was created
    pub fn initial_report(&self) -> &RerouteReport {
        &self.initial_report
    }

    /// Drain the attribute edits made since the last call
    pub fn take_changes(&mut self) -> Vec<AttributeChange> {
        self.diagram.take_changes()
    }

    /// Keep or stop keeping attribute edits for [`DragController::take_changes`]
    ///
    /// Turning recording off drops edits not yet taken.
    pub fn set_change_recording(&mut self, enabled: bool) {
        self.diagram.set_change_recording(enabled);
    }

    pub fn handle(&mut self, event: DragEvent<'_>) -> EventOutcome {
        match event {
            DragEvent::Down { target, pointer } => self.pointer_down(target, pointer),
            DragEvent::Move(pointer) => self.pointer_move(pointer),
            DragEvent::Up => self.pointer_up(),
            DragEvent::Leave => self.pointer_leave(),
        }
    }

    /// Grab the node whose shape has id `target`
    pub fn pointer_down(&mut self, target: &str, pointer: PointerSample) -> EventOutcome {
        if self.is_dragging() {
            trace!(target, "Already dragging");
            return EventOutcome::Ignored;
        }
        let Some(node) = self.draggable_node(target) else {
            trace!(target, "Not a draggable node");
            return EventOutcome::Ignored;
        };
        let Some(local) = pointer.local() else {
            warn!(transform = ?pointer.transform, "Singular surface transform");
            return EventOutcome::Ignored;
        };

        match tracker::capture(&self.diagram, node, local) {
            Ok(grab) => {
                debug!(node = %target, dependents = grab.dependents.len(), "Drag started");
                self.state = DragState::Dragging(grab);
                EventOutcome::Started(node)
            }
            Err(e) => {
                warn!(node = %target, error = %e, "Cannot grab node");
                EventOutcome::Ignored
            }
        }
    }

    /// Follow the pointer and reroute affected connectors
    pub fn pointer_move(&mut self, pointer: PointerSample) -> EventOutcome {
        let DragState::Dragging(grab) = &self.state else {
            return EventOutcome::Ignored;
        };
        let Some(local) = pointer.local() else {
            warn!(transform = ?pointer.transform, "Singular surface transform");
            return EventOutcome::Ignored;
        };

        let node = grab.node;
        tracker::translate(&mut self.diagram, grab, local);
        let report = self.router.reroute_from(&mut self.diagram, node);
        EventOutcome::Moved(report)
    }

    pub fn pointer_up(&mut self) -> EventOutcome {
        self.commit()
    }

    /// Leaving the surface ends the drag the same way releasing the button does
    pub fn pointer_leave(&mut self) -> EventOutcome {
        self.commit()
    }

    /// Export the move-log through `sink`
    pub fn generate_save_file(&self, sink: &mut dyn SaveSink) -> Result<ExportOutcome> {
        export::generate_save_file(
            &self.move_log,
            self.diagram.location(),
            &self.diagram.config().export,
            sink,
        )
    }

    fn commit(&mut self) -> EventOutcome {
        let DragState::Dragging(grab) = std::mem::take(&mut self.state) else {
            return EventOutcome::Ignored;
        };
        let node = self.diagram.node(grab.node);
        let commit_span = span!(Level::DEBUG, "commit", node = %node.id);
        let _enter = commit_span.enter();

        match self.diagram.position(grab.node) {
            Ok(at) => {
                let entry = MoveEntry::truncated(node.id.clone(), at.x, at.y);
                info!(node = %entry.id, x = entry.x, y = entry.y, "Drag committed");
                self.move_log.record(entry.clone());
                EventOutcome::Committed(entry)
            }
            Err(e) => {
                warn!(error = %e, "Dropped node has no readable position");
                EventOutcome::Ignored
            }
        }
    }

    fn draggable_node(&self, target: &str) -> Option<NodeId> {
        let document = self.diagram.document();
        let element = document.by_id(target)?;
        if document.name(element) != NODE_TAG || !document.has_class(element, DRAGGABLE_CLASS) {
            return None;
        }
        self.diagram.node_for_element(element)
    }
}
