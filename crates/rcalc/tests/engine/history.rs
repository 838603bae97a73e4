//! Tests for undo and redo.

use pretty_assertions::assert_eq;
use rcalc::{EngineConfig, ErrorKind, Value};

use super::{Event, engine, engine_with, summarize};

#[test]
fn undo_restores_previous_line() {
    let mut e = engine();
    e.submit_text("1 2").unwrap();
    e.submit_text("add").unwrap();
    e.submit_text("\\undo").unwrap();
    assert_eq!(e.snapshot().values(), vec![Value::int(1), Value::int(2)]);
    e.submit_text("\\undo").unwrap();
    assert!(e.snapshot().is_empty());
    assert!(!e.can_undo());
}

#[test]
fn redo_reapplies() {
    let mut e = engine();
    e.submit_text("3 4 mul").unwrap();
    e.submit_text("\\undo").unwrap();
    e.submit_text("\\redo").unwrap();
    assert_eq!(e.snapshot().values(), vec![Value::int(12)]);
    assert!(!e.can_redo());
}

#[test]
fn new_line_clears_redo() {
    let mut e = engine();
    e.submit_text("1").unwrap();
    e.submit_text("\\undo").unwrap();
    e.submit_text("2").unwrap();
    assert!(!e.can_redo());
    e.renderer_mut().take();
    e.submit_text("\\redo").unwrap();
    assert_eq!(
        e.renderer_mut().take(),
        vec![Event::Info("nothing to redo".to_string())]
    );
}

#[test]
fn undo_sends_full_replace() {
    let mut e = engine();
    e.submit_text("1 2").unwrap();
    e.submit_text("swap").unwrap_err();
    e.submit_text("\\swap").unwrap();
    e.renderer_mut().take();
    e.submit_text("\\undo").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["=[1 2]"]);
}

#[test]
fn undo_within_a_line_is_rejected() {
    let mut e = engine();
    e.submit_text("1").unwrap();
    assert_eq!(
        e.submit_text("\\undo \\undo").unwrap_err().kind(),
        ErrorKind::Parse
    );
    assert_eq!(e.snapshot().values(), vec![Value::int(1)]);
    assert!(e.can_undo());
}

#[test]
fn history_limit_caps_undo() {
    let config = EngineConfig {
        history_limit: 2,
        ..EngineConfig::default()
    };
    let mut e = engine_with(config);
    for n in 1..=4 {
        e.submit_text(&n.to_string()).unwrap();
    }
    e.submit_text("\\undo").unwrap();
    e.submit_text("\\undo").unwrap();
    assert_eq!(e.snapshot().values(), vec![Value::int(1), Value::int(2)]);
    assert!(!e.can_undo());
}

#[test]
fn renderer_commands_are_not_history() {
    let mut e = engine();
    e.submit_text("\\help").unwrap();
    assert_eq!(e.renderer().handled, vec!["\\help"]);
    assert!(!e.can_undo());
    assert_eq!(e.renderer().events, vec![Event::Command("\\help".to_string())]);
}

#[test]
fn renderer_commands_run_after_commit() {
    let mut e = engine();
    e.submit_text("1 \\help 2").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["+1", "+2", "\\help"]);
}

#[test]
fn renderer_commands_on_failed_lines_never_run() {
    let mut e = engine();
    e.submit_text("\\help 1 add").unwrap_err();
    e.submit_text("\\help frob").unwrap_err();
    assert!(e.renderer().handled.is_empty());
    assert_eq!(e.snapshot().len(), 0);
}
