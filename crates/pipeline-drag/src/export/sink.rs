//! Destinations for exported artifacts

use std::path::{Path, PathBuf};
use tracing::{debug, info, span, Level};

use crate::core::{ExportConfig, Result};

use super::{ExportArtifact, MoveLog};

/// Where notices and downloads go
///
/// The browser build shows notices with `window.alert` and downloads through a
/// temporary link. Native hosts can write into a directory instead.
pub trait SaveSink {
    /// Surface a short message to the user
    fn notify(&mut self, message: &str);

    /// Deliver one artifact
    fn download(&mut self, artifact: &ExportArtifact) -> Result<()>;
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The move-log was empty; only the notice was shown
    NothingMoved,
    /// One artifact with this file name was delivered
    Downloaded(String),
}

/// Export the move-log of the diagram at `location` into `sink`
///
/// The log is left untouched, so exporting twice yields the same file.
pub fn generate_save_file(
    log: &MoveLog,
    location: &str,
    config: &ExportConfig,
    sink: &mut dyn SaveSink,
) -> Result<ExportOutcome> {
    let export_span = span!(Level::INFO, "generate_save_file", entries = log.len());
    let _enter = export_span.enter();

    if log.is_empty() {
        debug!("Move-log empty, nothing to export");
        sink.notify(&config.notice);
        return Ok(ExportOutcome::NothingMoved);
    }

    let artifact = ExportArtifact::from_move_log(log, location, config)?;
    sink.download(&artifact)?;
    info!(file_name = %artifact.file_name, "Exported positions");
    Ok(ExportOutcome::Downloaded(artifact.file_name))
}

/// Writes artifacts into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    notices: Vec<String>,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            notices: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Notices received so far
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Paths of the files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SaveSink for DirectorySink {
    fn notify(&mut self, message: &str) {
        info!(%message, "Export notice");
        self.notices.push(message.to_string());
    }

    fn download(&mut self, artifact: &ExportArtifact) -> Result<()> {
        let path = self.dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.contents)?;
        debug!(path = %path.display(), "Wrote artifact");
        self.written.push(path);
        Ok(())
    }
}
