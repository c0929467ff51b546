//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, LogEntry, and DefaultLogger filtering/formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "chess3d::test".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug_names() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_with_file_line() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "chess3d::Scene".to_string(),
        message: "cycle".to_string(),
        file: Some("scene.rs"),
        line: Some(42),
    };

    assert_eq!(entry.file, Some("scene.rs"));
    assert_eq!(entry.line, Some(42));
}

#[test]
fn test_log_entry_clone() {
    let a = entry(LogSeverity::Warn, "warning");
    let b = a.clone();
    assert_eq!(a.severity, b.severity);
    assert_eq!(a.message, b.message);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_min_severity_is_debug() {
    let logger = DefaultLogger::default();
    assert_eq!(logger.min_severity(), LogSeverity::Debug);
    assert!(!logger.accepts(LogSeverity::Trace));
    assert!(logger.accepts(LogSeverity::Debug));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_custom_threshold() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Warn);
    assert!(!logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Warn));
}

#[test]
fn test_format_entry_contains_source_and_message() {
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Info, "scene loaded"));
    assert!(line.contains("chess3d::test"));
    assert!(line.contains("scene loaded"));
    assert!(!line.contains("(scene.rs"));
}

#[test]
fn test_format_entry_appends_file_line() {
    let mut e = entry(LogSeverity::Error, "boom");
    e.file = Some("board.rs");
    e.line = Some(7);
    let line = DefaultLogger::format_entry(&e);
    assert!(line.contains("(board.rs:7)"));
}

#[test]
fn test_default_logger_log_does_not_panic() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);
    logger.log(&entry(LogSeverity::Trace, "trace"));
    logger.log(&entry(LogSeverity::Error, "error"));
}
