//! Export of committed node positions
//!
//! The [`MoveLog`] collects one entry per moved node. On request it is turned
//! into an [`ExportArtifact`] and handed to a [`SaveSink`].

mod artifact;
mod move_log;
mod sink;

pub use artifact::{artifact_file_name, ExportArtifact, POSITIONS_MIME};
pub use move_log::{MoveEntry, MoveLog};
pub use sink::{generate_save_file, DirectorySink, ExportOutcome, SaveSink};
