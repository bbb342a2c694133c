//! Diagram configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{DiagramError, Metrics, Result};

/// Notice shown when an export is requested before anything was moved
pub const DEFAULT_EMPTY_NOTICE: &str = "No pipelines have been moved yet.";

/// Suffix appended to the diagram base name for exported position files
pub const DEFAULT_EXPORT_SUFFIX: &str = "_positions.json";

/// Id of the element that triggers a position export
pub const DEFAULT_SAVE_TRIGGER_ID: &str = "saveButtonGroup";

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Appended to the diagram base name to form the artifact file name
    pub suffix: String,
    /// Text of the notice surfaced for an empty move-log
    pub notice: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_EXPORT_SUFFIX.to_string(),
            notice: DEFAULT_EMPTY_NOTICE.to_string(),
        }
    }
}

/// Top-level configuration for a loaded diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub metrics: Metrics,
    pub export: ExportConfig,
    pub save_trigger_id: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            metrics: Metrics::default(),
            export: ExportConfig::default(),
            save_trigger_id: DEFAULT_SAVE_TRIGGER_ID.to_string(),
        }
    }
}

impl DiagramConfig {
    /// Parse a config from JSON text
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: DiagramConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject metrics that would make routing meaningless
    pub fn validate(&self) -> Result<()> {
        let m = &self.metrics;
        if !(m.width > 0.0 && m.height > 0.0) {
            return Err(DiagramError::config_error(format!(
                "node size must be positive, got {}x{}",
                m.width, m.height
            )));
        }
        if m.margin < 0.0 || !m.margin.is_finite() {
            return Err(DiagramError::config_error(format!(
                "routing margin must be non-negative, got {}",
                m.margin
            )));
        }
        if self.export.suffix.is_empty() {
            return Err(DiagramError::config_error("export suffix is empty"));
        }
        Ok(())
    }
}
