//! Pipeline Drag - Interactive repositioning of pipeline diagram stages
//!
//! Loads an authored SVG pipeline diagram, lets the user drag stages around,
//! keeps every connector routed between its endpoints and exports the final
//! positions as JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use pipeline_drag::prelude::*;
//!
//! let svg = r#"<svg>
//!   <rect id="build" class="draggable" x="0" y="0"/>
//!   <rect id="test" class="draggable" x="400" y="0"/>
//!   <line id="post_build_pre_test-SegmentA"/>
//!   <line id="post_build_pre_test-SegmentB"/>
//! </svg>"#;
//!
//! let mut controller = pipeline_drag::controller(svg, "ci.svg").unwrap();
//! controller.pointer_down("test", PointerSample::at(410.0, 10.0));
//! controller.pointer_move(PointerSample::at(510.0, 210.0));
//! controller.pointer_up();
//!
//! let entry = controller.move_log().get("test").unwrap();
//! assert_eq!((entry.x, entry.y), (500, 200));
//! ```
//!
//! # Components
//!
//! * [`document`] parses markup and records attribute edits
//! * [`diagram`] indexes stages and connectors into an explicit graph
//! * [`routing`] computes connector geometry and runs the reroute cascade
//! * [`drag`] tracks grabbed stages and drives the drag session
//! * [`export`] turns committed moves into a downloadable positions file

pub mod core;
pub mod diagram;
pub mod document;
pub mod drag;
pub mod export;
pub mod routing;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{DiagramConfig, DiagramError, Metrics, Point, ScreenTransform};
    pub use crate::diagram::{ConnectorId, Diagram, NodeId};
    pub use crate::drag::{DragController, DragEvent, DragState, EventOutcome, PointerSample};
    pub use crate::export::{
        DirectorySink, ExportArtifact, ExportOutcome, MoveEntry, MoveLog, SaveSink,
    };
    pub use crate::routing::{ConnectorRouter, RerouteReport, Route};
}

/// Load and index a diagram with the default configuration
///
/// # Example
/// ```rust
/// let diagram = pipeline_drag::load(
///     r#"<svg><rect id="a" class="draggable" x="0" y="0"/></svg>"#,
///     "a.svg",
/// )
/// .unwrap();
/// assert_eq!(diagram.node_count(), 1);
/// ```
pub fn load(markup: &str, location: &str) -> anyhow::Result<diagram::Diagram> {
    Ok(diagram::Diagram::load(markup, location)?)
}

/// Load a diagram and wrap it in a drag session
///
/// Every connector is routed before this returns.
pub fn controller(markup: &str, location: &str) -> anyhow::Result<drag::DragController> {
    Ok(drag::DragController::new(load(markup, location)?))
}

/// Load a diagram with a configuration read from a JSON file
pub fn controller_with_config_file(
    markup: &str,
    location: &str,
    config_path: impl AsRef<std::path::Path>,
) -> anyhow::Result<drag::DragController> {
    let config = DiagramConfig::from_file(config_path)?;
    let diagram = diagram::Diagram::load_with_config(markup, location, config)?;
    Ok(drag::DragController::new(diagram))
}
