//! Tests for renderer notifications and rendered items.

use pretty_assertions::assert_eq;
use rcalc::{EngineConfig, Type};

use super::{Event, engine, engine_with, summarize};

#[test]
fn pushes_and_applications() {
    let mut e = engine();
    e.submit_text("3 4").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["+3", "+4"]);
    e.submit_text("add").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["-", "-", "+7"]);
}

#[test]
fn deltas_follow_token_order() {
    let mut e = engine();
    e.submit_text("1 2 add 5 mul").unwrap();
    assert_eq!(
        summarize(&e.renderer_mut().take()),
        vec!["+1", "+2", "-", "-", "+3", "+5", "-", "-", "+15"]
    );
}

#[test]
fn commands_emit_deltas() {
    let mut e = engine();
    e.submit_text("1 2").unwrap();
    e.renderer_mut().take();

    e.submit_text("\\swap").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["-", "-", "+2", "+1"]);
    e.submit_text("\\dup \\pop").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["+1", "-"]);
    e.submit_text("\\clear").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["=[]"]);
}

#[test]
fn replace_collapses_the_line() {
    let mut e = engine();
    e.submit_text("1 \\clear 2 3").unwrap();
    assert_eq!(summarize(&e.renderer_mut().take()), vec!["=[2 3]"]);
}

#[test]
fn rendered_input_chain() {
    let mut e = engine();
    e.submit_text("0x10 0x01 add 2 mul").unwrap();
    let events = e.renderer_mut().take();
    let Some(Event::Add(item)) = events.last() else {
        panic!("expected an add, got {events:?}");
    };
    assert_eq!(item.input, vec!["0x10", "0x1", "add", "2", "mul"]);
    assert_eq!(item.output, "0x22");
    assert_eq!(item.output_type, Type::Int);
}

#[test]
fn vec2_accessibility() {
    let mut e = engine();
    e.submit_text("[1.5, 2.5]").unwrap();
    let events = e.renderer_mut().take();
    let [Event::Add(item)] = &events[..] else {
        panic!("expected one add, got {events:?}");
    };
    assert_eq!(item.accessibility, "Vector with components 1.5, and 2.5");
    assert_eq!(item.output_type, Type::Vec2);
}

#[test]
fn configured_precision() {
    let config = EngineConfig {
        real_precision: Some(4),
        ..EngineConfig::default()
    };
    let mut e = engine_with(config);
    e.submit_text("1 3 /").unwrap();
    let rendered = e.rendered_stack();
    assert_eq!(rendered[0].output, "0.3333");
    assert_eq!(rendered[0].input, vec!["1", "3", "div"]);
}

#[test]
fn operator_examples_render() {
    let e = engine();
    let examples = e.operator_examples("idiv").unwrap();
    let outputs: Vec<&str> = examples
        .iter()
        .map(|ex| ex.items[0].output.as_str())
        .collect();
    assert_eq!(outputs, vec!["3", "-4"]);
    assert!(e.renderer().events.is_empty());
}
