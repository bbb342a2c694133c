//! Pointer-driven dragging of pipeline nodes

mod session;
pub mod tracker;

pub use session::{DragController, DragEvent, DragState, EventOutcome, PointerSample};
pub use tracker::{capture, translate, DependentKind, DependentOffset, Grab};
