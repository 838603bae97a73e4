//! Tests for error reporting and submission atomicity.

use pretty_assertions::assert_eq;
use rcalc::{EngineConfig, Error, ErrorKind, Value};

use super::{Event, engine, engine_with, eval_err};

#[test]
fn error_kinds() {
    assert_eq!(eval_err("add"), ErrorKind::StackUnderflow);
    assert_eq!(eval_err("_m 1 add"), ErrorKind::TypeMismatch);
    assert_eq!(eval_err("1 2 frob"), ErrorKind::Parse);
    assert_eq!(eval_err("[1, 2"), ErrorKind::Parse);
    assert_eq!(eval_err("\\nope"), ErrorKind::UnknownCommand);
    assert_eq!(eval_err("[[1, 2], [3]]"), ErrorKind::ShapeMismatch);
}

#[test]
fn underflow_names_the_operator() {
    let err = engine().submit_text("1 atan2").unwrap_err();
    assert_eq!(
        err,
        Error::StackUnderflow {
            op: "atan2".into(),
            needed: 2,
            available: 1
        }
    );
}

#[test]
fn failing_token_discards_whole_line() {
    let mut e = engine();
    e.submit_text("10").unwrap();
    e.renderer_mut().take();
    let before = e.snapshot();

    let err = e.submit_text("1 2 add 0 /").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    assert_eq!(e.snapshot(), before);
    assert_eq!(e.reader().snapshot(), before);
    assert_eq!(
        e.renderer_mut().take(),
        vec![Event::Error("division by zero".to_string())]
    );

    // Nothing was recorded either, so undo goes back past "10".
    e.submit_text("\\undo").unwrap();
    assert!(e.snapshot().is_empty());
}

#[test]
fn stack_depth_limit() {
    let config = EngineConfig {
        max_stack_depth: Some(3),
        ..EngineConfig::default()
    };
    let mut e = engine_with(config);
    e.submit_text("1 2").unwrap();
    assert_eq!(
        e.submit_text("3 4").unwrap_err().kind(),
        ErrorKind::StackOverflow
    );
    assert_eq!(e.snapshot().values(), vec![Value::int(1), Value::int(2)]);
    // Net depth never exceeds the limit here.
    e.submit_text("3 add 4").unwrap();
    assert_eq!(e.snapshot().len(), 3);
}

#[test]
fn error_messages_name_the_problem() {
    let mut e = engine();
    e.submit_text("_m sqrt").unwrap_err();
    let events = e.renderer_mut().take();
    assert_eq!(
        events,
        vec![Event::Error("'sqrt' cannot be applied to Unit".to_string())]
    );
}
