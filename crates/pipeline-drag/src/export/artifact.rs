//! The downloadable positions file

use crate::core::{ExportConfig, Result};

use super::MoveLog;

/// MIME type of exported position files
pub const POSITIONS_MIME: &str = "application/json";

/// A named file ready to hand to a [`SaveSink`](super::SaveSink)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
    pub mime: &'static str,
}

impl ExportArtifact {
    /// Serialize `log` into a file named after the diagram at `location`
    pub fn from_move_log(log: &MoveLog, location: &str, config: &ExportConfig) -> Result<Self> {
        Ok(Self {
            file_name: artifact_file_name(location, &config.suffix),
            contents: serde_json::to_string_pretty(log)?,
            mime: POSITIONS_MIME,
        })
    }
}

/// Base name of the diagram at `location`, without its `.svg`, plus `suffix`
///
/// Query strings and fragments are ignored, so a page URL works as well as a
/// file path.
pub fn artifact_file_name(location: &str, suffix: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let base = path.rsplit('/').next().unwrap_or_default();
    format!("{}{}", base.replacen(".svg", "", 1), suffix)
}
