//! Integration tests for Engine logging system
//!
//! These tests verify the global logger and the engine_* macros.
//!
//! Run with: cargo test --test logging_integration_tests

use chess3d_engine::chess3d::{Engine, Error};
use chess3d_engine::chess3d::log::{DefaultLogger, Logger, LogEntry, LogSeverity};
use chess3d_engine::chess3d::scene::{Node, NodeDesc, LightDesc, RenderContext, RenderList, Scene};
use chess3d_engine::glam::Mat4;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].source, "test::module");
    assert_eq!(captured[1].message, "Test warning message");
    assert_eq!(captured[1].file, None);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_macros_route_through_engine() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    chess3d_engine::engine_trace!("test::macros", "trace {}", 1);
    chess3d_engine::engine_debug!("test::macros", "debug {}", 2);
    chess3d_engine::engine_info!("test::macros", "info {}", 3);
    chess3d_engine::engine_warn!("test::macros", "warn {}", 4);
    chess3d_engine::engine_error!("test::macros", "error {}", 5);

    let captured = entries.lock().unwrap();
    let severities: Vec<LogSeverity> = captured.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]
    );
    assert_eq!(captured[2].message, "info 3");
    assert!(captured[4].file.is_some());
    assert!(captured[4].line.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_engine_err_logs_and_builds() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let err = chess3d_engine::engine_err!(InvalidBoard, "test::board", "square {} taken", "(0, 3)");

    assert!(matches!(err, Error::InvalidBoard(ref msg) if msg == "square (0, 3) taken"));
    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].source, "test::board");

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_failed_render_hook_warns() {
    struct Failing;
    impl RenderContext for Failing {
        fn render_node(&mut self, _node: &Node, _model_view: Mat4) -> bool {
            false
        }
        fn set_additive_blending(&mut self, _enabled: bool) {}
    }

    let mut scene = Scene::new();
    let root = scene.instantiate(
        &NodeDesc::group("[root]")
            .with_child(NodeDesc::light("sun", LightDesc::default()))
            .with_child(NodeDesc::mesh("rook").with_bounding_radius(1.0)),
    );
    let mut list = RenderList::new();
    list.add_entry(&scene, root);

    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    let stats = list.render(&scene, Mat4::IDENTITY, Mat4::IDENTITY, &mut Failing);
    Engine::reset_logger();

    assert_eq!(stats.failed, 2);
    let captured = entries.lock().unwrap();
    let warnings: Vec<&LogEntry> = captured.iter().filter(|e| e.severity == LogSeverity::Warn).collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[1].message.contains("rook"));
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());

    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
}

#[test]
#[serial]
fn test_integration_filtered_default_logger() {
    Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Error));
    // Dropped by the filter, must not panic
    Engine::log(LogSeverity::Debug, "test", "hidden".to_string());
    Engine::log(LogSeverity::Error, "test", "shown".to_string());
    Engine::reset_logger();
}
