//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

mod common;

use common::{A, CHAIN};
use pipeline_drag::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use pipeline_drag::prelude::*;
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "PIPELINE_DRAG_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "PIPELINE_DRAG_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest must
    // fail gracefully rather than panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("pipeline_drag=debug,warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("compact"));
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_session_runs_with_logging_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let markup = CHAIN.replace(
        "</svg>",
        r#"<line id="post_rect_0_0_pre_ghost-SegmentA"/><line id="post_rect_0_0_pre_ghost-SegmentB"/></svg>"#,
    );
    let mut controller = pipeline_drag::controller(&markup, "ci.svg").unwrap();
    controller.pointer_down(A, PointerSample::at(10.0, 10.0));
    controller.pointer_move(PointerSample::at(50.0, 90.0));
    assert!(matches!(controller.pointer_up(), EventOutcome::Committed(_)));
}
