//! Logging infrastructure for diagram interaction
//!
//! Structured logging goes through the `tracing` crate. Native builds install a
//! `tracing-subscriber` registry; browser builds log to the console through
//! `tracing-wasm`.
//!
//! # Usage
//!
//! ```rust
//! use pipeline_drag::core::logging::init_logging;
//!
//! // Initialize with default settings (ignore "already initialized")
//! let _ = init_logging(None, None);
//! ```
//!
//! # Environment Variables
//!
//! - `PIPELINE_DRAG_LOG_LEVEL`: log level or filter directive
//!   (trace|debug|info|warn|error|off)
//! - `PIPELINE_DRAG_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: fallback filter when no level is given
//!
//! # Filtering Logs
//!
//! ```bash
//! # Trace the connector cascade only
//! RUST_LOG="info,pipeline_drag::routing=trace"
//! ```

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Environment variable consulted for the log level
pub const LOG_LEVEL_ENV: &str = "PIPELINE_DRAG_LOG_LEVEL";

/// Environment variable consulted for the log format
pub const LOG_FORMAT_ENV: &str = "PIPELINE_DRAG_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Initialize the global tracing subscriber
///
/// * `level` - log level or filter directive. Falls back to
///   `PIPELINE_DRAG_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// * `format` - compact|pretty|json. Falls back to `PIPELINE_DRAG_LOG_FORMAT`,
///   then `compact`. Ignored in the browser.
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        // The console layer has no format options
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let log_level = level
            .map(|s| s.to_string())
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        let log_format = format
            .map(|s| s.to_string())
            .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
            .unwrap_or_else(|| "compact".to_string());

        // Validate the format before touching global state
        let format = LogFormat::from_str(&log_format)
            .map_err(|e| format!("Invalid log format: {}", e))?;

        let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Compact => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_target(false)
                            .with_level(true)
                            .with_file(false)
                            .with_line_number(false)
                            .with_span_events(FmtSpan::NONE),
                    )
                    .try_init()?;
            }
            LogFormat::Pretty => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_target(true)
                            .with_level(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::ACTIVE)
                            .pretty(),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_target(true)
                            .with_level(true)
                            .with_span_events(FmtSpan::CLOSE)
                            .json(),
                    )
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("yaml").is_err());
    }

    #[test]
    fn test_invalid_format_is_rejected_before_init() {
        assert!(init_logging(Some("debug"), Some("xml")).is_err());
    }
}
